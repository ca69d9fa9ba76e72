use std::fmt::Display;
use std::io::Write;

use parking_lot::Mutex;

#[cfg(feature = "metrics")]
use crate::metrics::snapshot::ListGaugeMetricsSnapshot;
use crate::snapshot::ListGaugeSnapshot;
use crate::traits::MetricsExporter;

/// Line-oriented text exporter for list gauge snapshots.
///
/// A value snapshot is written as a header carrying the retained count,
/// followed by one line per value, oldest first:
///
/// ```text
/// # TYPE app_recent_errors list
/// app_recent_errors{index="0"} disk full
/// app_recent_errors{index="1"} timeout
/// ```
///
/// Values are escaped so that each one stays on a single line: `\` becomes
/// `\\`, a line feed becomes `\n` and a carriage return `\r`. Metric
/// names are reduced to `[a-zA-Z_:][a-zA-Z0-9_:]*`.
///
/// With the `metrics` feature, the gauge's own counters export in the
/// Prometheus text exposition format. Write failures are ignored.
///
/// # Example
///
/// ```
/// use listgauge::exporter::TextExporter;
/// use listgauge::gauge::ListGauge;
///
/// let gauge = ListGauge::with_defaults("recent_errors");
/// gauge.add("disk full");
/// gauge.add("timeout");
///
/// let exporter = TextExporter::new("app", Vec::new());
/// gauge.report(&exporter);
///
/// let text = String::from_utf8(exporter.into_inner()).unwrap();
/// assert!(text.contains("app_recent_errors{index=\"0\"} disk full"));
/// assert!(text.contains("app_recent_errors{index=\"1\"} timeout"));
/// ```
#[derive(Debug)]
pub struct TextExporter<W: Write + Send> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> TextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the exporter, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            sanitize(suffix)
        } else {
            sanitize(&format!("{}_{}", self.prefix, suffix))
        }
    }

    #[cfg(feature = "metrics")]
    fn write_sample(writer: &mut W, kind: &str, name: &str, value: u64) {
        let _ = writeln!(writer, "# TYPE {} {}", name, kind);
        let _ = writeln!(writer, "{} {}", name, value);
    }
}

/// Maps characters outside `[a-zA-Z0-9_:]` to `_` and prepends `_` to an
/// empty name or one starting with a digit.
fn sanitize(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 1);
    if name.chars().next().is_none_or(|c| c.is_ascii_digit()) {
        out.push('_');
    }
    out.extend(name.chars().map(|c| {
        if c.is_ascii_alphanumeric() || c == '_' || c == ':' {
            c
        } else {
            '_'
        }
    }));
    out
}

/// Escapes a rendered value so it occupies exactly one line.
fn escape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}

impl<T: Display, W: Write + Send> MetricsExporter<ListGaugeSnapshot<T>> for TextExporter<W> {
    fn export(&self, snapshot: &ListGaugeSnapshot<T>) {
        let name = self.metric_name(snapshot.name());
        let mut writer = self.writer.lock();
        let _ = writeln!(writer, "# TYPE {} list", name);
        for (index, value) in snapshot.iter().enumerate() {
            let value = escape_value(&value.to_string());
            let _ = writeln!(writer, "{}{{index=\"{}\"}} {}", name, index, value);
        }
        let _ = writer.flush();
    }
}

#[cfg(feature = "metrics")]
impl<W: Write + Send> MetricsExporter<ListGaugeMetricsSnapshot> for TextExporter<W> {
    fn export(&self, snapshot: &ListGaugeMetricsSnapshot) {
        let counters = [
            ("add_calls_total", snapshot.add_calls),
            ("snapshot_calls_total", snapshot.snapshot_calls),
            ("evict_calls_total", snapshot.evict_calls),
            ("size_evictions_total", snapshot.size_evictions),
            ("age_evictions_total", snapshot.age_evictions),
        ];
        let gauges = [
            ("len", snapshot.len as u64),
            ("max_items", snapshot.max_items as u64),
        ];

        let mut writer = self.writer.lock();
        for (suffix, value) in counters {
            Self::write_sample(&mut writer, "counter", &self.metric_name(suffix), value);
        }
        for (suffix, value) in gauges {
            Self::write_sample(&mut writer, "gauge", &self.metric_name(suffix), value);
        }
        let _ = writer.flush();
    }
}
