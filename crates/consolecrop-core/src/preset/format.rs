//! Text persistence format for presets.
//!
//! One record per preset, two lines each:
//!
//! ```text
//! <name>
//! \tleft:<float>, right:<float>, top:<float>, bottom:<float>
//! ```
//!
//! Loading is best-effort: the first malformed record ends the load and
//! every preset parsed before it is kept.

use tracing::{debug, warn};

use super::store::{validate_name, PresetStore};

/// Decimal digits written for every fraction.
pub const FRACTION_PRECISION: usize = 7;

const FIELDS: [&str; 4] = ["left", "right", "top", "bottom"];

impl PresetStore {
    /// Parse persisted text into an unbounded store.
    pub fn load(text: &str) -> Self {
        Self::load_with_capacity(text, None)
    }

    /// Parse persisted text, stopping once `capacity` presets are loaded.
    ///
    /// Parsing stops cleanly at EOF or an empty name line. A truncated or
    /// malformed record, a fraction outside `[0, 1]`, or a reserved name
    /// stops the load with a warning. A name repeated later in the file overwrites the earlier one.
    pub fn load_with_capacity(text: &str, capacity: Option<usize>) -> Self {
        let mut store = PresetStore::with_capacity(capacity);
        let mut lines = text.lines().enumerate();

        while !store.is_full() {
            let Some((line_no, name)) = lines.next() else {
                break;
            };
            if name.is_empty() {
                break;
            }
            if validate_name(name).is_err() {
                warn!(line = line_no + 1, name, "reserved preset name, stopping load");
                break;
            }
            let Some((value_no, values)) = lines.next() else {
                warn!(line = line_no + 1, name, "preset record truncated, stopping load");
                break;
            };
            let Some([left, right, top, bottom]) = parse_values(values) else {
                warn!(line = value_no + 1, name, "malformed preset values, stopping load");
                break;
            };
            if let Some(value) = [left, right, top, bottom]
                .into_iter()
                .find(|v| !(0.0..=1.0).contains(v))
            {
                warn!(
                    line = value_no + 1,
                    name,
                    value,
                    "preset fraction out of range, stopping load"
                );
                break;
            }
            if let Err(err) = store.upsert(name, left, right, top, bottom) {
                warn!(line = line_no + 1, name, %err, "rejected preset, stopping load");
                break;
            }
        }

        debug!(count = store.len(), "loaded presets");
        store
    }

    /// Serialize every preset in store order.
    pub fn save(&self) -> String {
        let mut out = String::new();
        for preset in self.iter() {
            out.push_str(&format!(
                "{}\n\tleft:{:.prec$}, right:{:.prec$}, top:{:.prec$}, bottom:{:.prec$}\n",
                preset.name,
                preset.left_frac,
                preset.right_frac,
                preset.top_frac,
                preset.bottom_frac,
                prec = FRACTION_PRECISION,
            ));
        }
        out
    }
}

/// Parse `left:<f>, right:<f>, top:<f>, bottom:<f>` with any float precision.
fn parse_values(line: &str) -> Option<[f64; 4]> {
    let mut values = [0.0; 4];
    let mut fields = line.trim().split(',');

    for (slot, expected) in values.iter_mut().zip(FIELDS) {
        let (key, value) = fields.next()?.split_once(':')?;
        if key.trim() != expected {
            return None;
        }
        *slot = value.trim().parse().ok()?;
    }

    if fields.next().is_some() {
        return None;
    }
    Some(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::SliderRange;

    const SAMPLE: &str = "NES\n\tleft:0.1000000, right:0.1000000, top:0.0000000, bottom:0.0000000\n\
                          Super Nintendo\n\tleft:0.05, right:0.05, top:0.025, bottom:0.025\n";

    #[test]
    fn test_load_sample() {
        let store = PresetStore::load(SAMPLE);
        assert_eq!(store.names(), vec!["NES", "Super Nintendo"]);

        let snes = store.get("Super Nintendo").unwrap();
        assert_eq!(snes.left_frac, 0.05);
        assert_eq!(snes.top_frac, 0.025);
    }

    #[test]
    fn test_save_format() {
        let mut store = PresetStore::new();
        store.upsert("GBA", 0.125, 0.25, 0.0, 1.0).unwrap();

        assert_eq!(
            store.save(),
            "GBA\n\tleft:0.1250000, right:0.2500000, top:0.0000000, bottom:1.0000000\n"
        );
    }

    #[test]
    fn test_save_empty() {
        assert_eq!(PresetStore::new().save(), "");
    }

    #[test]
    fn test_save_load_preserves_order_and_values() {
        let mut store = PresetStore::new();
        store.upsert("Z", 0.3, 0.0, 0.0, 0.1).unwrap();
        store.upsert("A", 1.0 / 3.0, 0.0, 0.5, 0.0).unwrap();

        let loaded = PresetStore::load(&store.save());
        assert_eq!(loaded.names(), vec!["Z", "A"]);
        let a = loaded.get("A").unwrap();
        assert!((a.left_frac - 1.0 / 3.0).abs() < 1e-6);
        assert_eq!(a.top_frac, 0.5);
    }

    #[test]
    fn test_round_trip_survives_apply() {
        let mut store = PresetStore::new();
        store
            .upsert_margins(
                "SD",
                &crate::geometry::CropMargins::new(17, 23, 9, 11),
                SliderRange::new(720, 480),
            )
            .unwrap();

        let loaded = PresetStore::load(&store.save());
        assert_eq!(
            loaded.apply("SD", SliderRange::new(720, 480)).unwrap(),
            crate::geometry::CropMargins::new(17, 23, 9, 11)
        );
    }

    #[test]
    fn test_truncated_record_dropped() {
        let text = "NES\n\tleft:0.1, right:0.1, top:0, bottom:0\nSNES\n";
        let store = PresetStore::load(text);
        assert_eq!(store.names(), vec!["NES"]);
    }

    #[test]
    fn test_malformed_record_stops_load() {
        let text = "NES\n\tleft:0.1, right:0.1, top:0, bottom:0\n\
                    Broken\n\tleft:abc, right:0.1, top:0, bottom:0\n\
                    Later\n\tleft:0.1, right:0.1, top:0, bottom:0\n";
        let store = PresetStore::load(text);
        assert_eq!(store.names(), vec!["NES"]);
    }

    #[test]
    fn test_short_value_line_stops_load() {
        let text = "NES\n\tleft:0.1, right:0.1\n";
        assert!(PresetStore::load(text).is_empty());
    }

    #[test]
    fn test_empty_name_line_stops_load() {
        let text = "NES\n\tleft:0.1, right:0.1, top:0, bottom:0\n\n\
                    SNES\n\tleft:0, right:0, top:0, bottom:0\n";
        let store = PresetStore::load(text);
        assert_eq!(store.names(), vec!["NES"]);
    }

    #[test]
    fn test_pixel_values_stop_load() {
        let text = "NES\n\tleft:0.1, right:0.1, top:0, bottom:0\n\
                    Old\n\tleft:32, right:32, top:0, bottom:0\n\
                    Later\n\tleft:0.1, right:0.1, top:0, bottom:0\n";
        let store = PresetStore::load(text);
        assert_eq!(store.names(), vec!["NES"]);
    }

    #[test]
    fn test_negative_or_nan_fraction_stops_load() {
        assert!(PresetStore::load("A\n\tleft:-0.1, right:0, top:0, bottom:0\n").is_empty());
        assert!(PresetStore::load("A\n\tleft:NaN, right:0, top:0, bottom:0\n").is_empty());
    }

    #[test]
    fn test_boundary_fractions_load() {
        let store = PresetStore::load("Full\n\tleft:1.0000000, right:0, top:0, bottom:1\n");
        assert_eq!(store.get("Full").unwrap().left_frac, 1.0);
    }

    #[test]
    fn test_reserved_name_stops_load() {
        let text = "None\n\tleft:0.1, right:0.1, top:0, bottom:0\n";
        assert!(PresetStore::load(text).is_empty());
    }

    #[test]
    fn test_duplicate_names_overwrite() {
        let text = "NES\n\tleft:0.1, right:0.1, top:0, bottom:0\n\
                    NES\n\tleft:0.2, right:0.2, top:0, bottom:0\n";
        let store = PresetStore::load(text);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("NES").unwrap().left_frac, 0.2);
    }

    #[test]
    fn test_load_respects_capacity() {
        let text = "A\n\tleft:0, right:0, top:0, bottom:0\n\
                    B\n\tleft:0, right:0, top:0, bottom:0\n\
                    C\n\tleft:0, right:0, top:0, bottom:0\n";
        let store = PresetStore::load_with_capacity(text, Some(2));
        assert_eq!(store.names(), vec!["A", "B"]);
        assert_eq!(store.capacity(), Some(2));
    }

    #[test]
    fn test_load_accepts_crlf() {
        let text = "NES\r\n\tleft:0.1, right:0.1, top:0, bottom:0\r\n";
        let store = PresetStore::load(text);
        assert_eq!(store.names(), vec!["NES"]);
    }

    #[test]
    fn test_parse_values_rejects_wrong_keys() {
        assert!(parse_values("\tright:0, left:0, top:0, bottom:0").is_none());
        assert!(parse_values("\tleft:0, right:0, top:0, bottom:0, extra:1").is_none());
        assert_eq!(
            parse_values("left:1,right:0.5,top:0.25,bottom:0"),
            Some([1.0, 0.5, 0.25, 0.0])
        );
    }
}
