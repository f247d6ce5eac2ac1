mod common;

mod tests {
    use ledstream::color::Rgb;
    use ledstream::protocol::raw;
    use ledstream::sink::RgbStrip;

    use crate::common::ScriptedDriver;

    fn strip(count: usize) -> RgbStrip<ScriptedDriver, 64> {
        RgbStrip::new(ScriptedDriver::new(), count)
    }

    #[test]
    fn test_whole_payload_is_pixels() {
        let mut strip = strip(16);
        assert!(raw::decode(&[10, 20, 30, 40, 50, 60, 70, 80], &mut strip));
        assert_eq!(strip.frame()[0], Rgb::new(10, 20, 30));
        assert_eq!(strip.frame()[1], Rgb::new(40, 50, 60));
        // trailing 2 bytes are a partial pixel, dropped
        assert_eq!(strip.frame()[2], Rgb::new(0, 0, 0));
    }

    #[test]
    fn test_three_bytes_is_one_pixel() {
        let mut strip = strip(16);
        assert!(raw::decode(&[1, 2, 3], &mut strip));
        assert_eq!(strip.frame()[0], Rgb::new(1, 2, 3));
    }

    #[test]
    fn test_too_short_or_oversized_rejected() {
        let mut strip = strip(16);
        assert!(!raw::decode(&[1, 2], &mut strip));
        assert!(!raw::decode(&[0u8; 1500], &mut strip));
        assert!(raw::decode(&[0u8; 1499], &mut strip));
    }

    #[test]
    fn test_extra_pixels_beyond_count_dropped() {
        let mut strip = strip(2);
        assert!(raw::decode(&[1, 2, 3, 4, 5, 6, 7, 8, 9], &mut strip));
        assert_eq!(strip.frame(), &[Rgb::new(1, 2, 3), Rgb::new(4, 5, 6)]);
    }
}
