//! Text exposition of collected snapshots

use prometheus::proto::MetricFamily;
use prometheus::{Encoder, TextEncoder};

use crate::error::Result;

/// Content type of [`render`] output
pub const CONTENT_TYPE: &str = prometheus::TEXT_FORMAT;

/// Render a snapshot in the Prometheus text exposition format.
///
/// Every family must carry at least one sample; `ExporterCollector::collect`
/// already drops empty ones.
pub fn render(families: &[MetricFamily]) -> Result<String> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder.encode(families, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use prometheus::core::Collector;
    use prometheus::{Gauge, GaugeVec, Opts};

    #[test]
    fn test_render_empty_snapshot() {
        assert_eq!(render(&[]).unwrap(), "");
    }

    #[test]
    fn test_render_labeled_gauge() {
        let gauge = GaugeVec::new(
            Opts::new("exchange_rate", "Exchange rate").namespace("bitcoin"),
            &["currency", "class"],
        )
        .unwrap();
        gauge.with_label_values(&["USD", "ltp"]).set(50000.1);

        let output = render(&gauge.collect()).unwrap();

        assert!(output.contains("# TYPE bitcoin_exchange_rate gauge"));
        assert!(output.contains(r#"bitcoin_exchange_rate{class="ltp",currency="USD"} 50000.1"#));
    }

    #[test]
    fn test_render_rejects_empty_family() {
        let gauge = GaugeVec::new(Opts::new("empty", "No samples"), &["label"]).unwrap();
        assert!(render(&gauge.collect()).is_err());

        let up = Gauge::new("up", "Up").unwrap();
        assert!(render(&up.collect()).unwrap().contains("up 0"));
    }

    #[test]
    fn test_content_type_is_text_format() {
        assert!(CONTENT_TYPE.starts_with("text/plain"));
    }
}
