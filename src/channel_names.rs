// src/channel_names.rs
/// Centralized RPS channel naming utilities
///
/// Provides consistent channel names across the parser, analysis and plot modules.
/// Number of RPS sensor channels (quadrature sine/cosine pairs).
pub const CHANNEL_COUNT: usize = 4;

/// All channel names as a static array, in CSV column order.
pub const CHANNEL_NAMES: [&str; CHANNEL_COUNT] = ["SinP", "CosP", "SinN", "CosN"];

/// Get the standard channel name for a given index
///
/// # Arguments
/// * `index` - Channel index (0=SinP, 1=CosP, 2=SinN, 3=CosN)
///
/// # Panics
/// Panics if index is greater than 3
#[allow(dead_code)]
pub fn channel_name(index: usize) -> &'static str {
    match index {
        0 => "SinP",
        1 => "CosP",
        2 => "SinN",
        3 => "CosN",
        _ => panic!(
            "Invalid channel index: {}. Expected 0 (SinP), 1 (CosP), 2 (SinN), or 3 (CosN)",
            index
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_name() {
        assert_eq!(channel_name(0), "SinP");
        assert_eq!(channel_name(1), "CosP");
        assert_eq!(channel_name(2), "SinN");
        assert_eq!(channel_name(3), "CosN");
    }

    #[test]
    #[should_panic(expected = "Invalid channel index")]
    fn test_channel_name_panic() {
        channel_name(4);
    }

    #[test]
    fn test_channel_names_constant() {
        assert_eq!(CHANNEL_NAMES.len(), CHANNEL_COUNT);
        assert_eq!(CHANNEL_NAMES[0], "SinP");
        assert_eq!(CHANNEL_NAMES[3], "CosN");
    }
}
