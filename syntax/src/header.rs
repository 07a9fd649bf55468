use knitout_core::{DEFAULT_CARRIER_COUNT, MachineSpec, Position};
use log::{debug, warn};

// HEADER BLOCK
// ================================================================================================

/// Accumulates `;;Key: value` header lines into a [MachineSpec].
///
/// Every header is optional and every malformed value falls back to the machine default with a
/// warning; the header block configures the compile, it never fails it.
#[derive(Debug, Default)]
pub struct HeaderBlock {
    spec: MachineSpec,
    saw_gauge: bool,
    saw_width: bool,
}

impl HeaderBlock {
    /// Applies one header line (the text between `;;` and end of line).
    pub fn apply(&mut self, line: &str) {
        let Some((key, value)) = line.split_once(':') else {
            warn!("ignoring malformed header line '{line}'");
            return;
        };
        let value = value.trim();
        match key.trim() {
            "Carriers" => self.apply_carriers(value),
            "Position" => self.apply_position(value),
            "Gauge" => self.apply_gauge(value),
            "Width" => self.apply_width(value),
            // machine model strings do not affect the compile
            "Machine" => debug!("machine header: {value}"),
            other => debug!("ignoring unrecognized header '{other}'"),
        }
    }

    fn apply_carriers(&mut self, value: &str) {
        let ids: usize = value.split_whitespace().count();
        match u8::try_from(ids) {
            Ok(count) if count > 0 => {
                if count != DEFAULT_CARRIER_COUNT {
                    warn!("expected {DEFAULT_CARRIER_COUNT} carriers but {count} were specified");
                }
                self.spec.carrier_count = count;
            },
            _ => warn!("ignoring unusable carriers header '{value}'"),
        }
    }

    fn apply_position(&mut self, value: &str) {
        match Position::from_header_value(value) {
            Some(position) => self.spec.position = position,
            None => {
                warn!("unknown position '{value}', defaulting to {:?}", Position::default());
            },
        }
    }

    fn apply_gauge(&mut self, value: &str) {
        match value.parse::<u32>() {
            Ok(gauge) if gauge > 0 => {
                self.spec.gauge = gauge;
                self.saw_gauge = true;
            },
            _ => warn!("ignoring unusable gauge header '{value}'"),
        }
    }

    fn apply_width(&mut self, value: &str) {
        match value.parse::<i32>() {
            Ok(width) if width > 0 => {
                self.spec.needle_count = width;
                self.saw_width = true;
            },
            _ => warn!("ignoring unusable width header '{value}'"),
        }
    }

    /// Resolves the final machine specification.
    ///
    /// A gauge header without an explicit width sizes the bed at 36 inches of needles.
    pub fn finish(self) -> MachineSpec {
        let mut spec = self.spec;
        if self.saw_gauge && !self.saw_width {
            spec.needle_count = 36 * spec.gauge as i32;
        }
        spec
    }
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use knitout_core::{MachineSpec, Position};

    use super::HeaderBlock;

    #[test]
    fn defaults_without_headers() {
        assert_eq!(HeaderBlock::default().finish(), MachineSpec::default());
    }

    #[test]
    fn parses_known_headers() {
        let mut block = HeaderBlock::default();
        block.apply("Carriers: 1 2 3 4 5 6 7 8 9 10");
        block.apply("Position: Center");
        block.apply("Gauge: 7");
        let spec = block.finish();
        assert_eq!(spec.carrier_count, 10);
        assert_eq!(spec.position, Position::Center);
        assert_eq!(spec.gauge, 7);
        // gauge without width implies a 36 inch bed
        assert_eq!(spec.needle_count, 252);
    }

    #[test]
    fn explicit_width_wins_over_gauge() {
        let mut block = HeaderBlock::default();
        block.apply("Gauge: 15");
        block.apply("Width: 540");
        assert_eq!(block.finish().needle_count, 540);
    }

    #[test]
    fn malformed_values_keep_defaults() {
        let mut block = HeaderBlock::default();
        block.apply("Position: Sideways");
        block.apply("Gauge: fifteen");
        block.apply("Carriers:");
        let spec = block.finish();
        assert_eq!(spec, MachineSpec::default());
    }
}
