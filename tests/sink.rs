mod common;

mod tests {
    use ledstream::FrameSink;
    use ledstream::calibration::CalibrationParams;
    use ledstream::color::{Rgb, Rgbw};
    use ledstream::config::StripConfig;
    use ledstream::sink::{ClockedStrip, MAX_LUMINANCE, RgbStrip, RgbwStrip};

    use crate::common::ScriptedDriver;

    fn full_params() -> CalibrationParams {
        CalibrationParams {
            gain: 255,
            red: 255,
            green: 255,
            blue: 255,
        }
    }

    #[test]
    fn test_rgb_strip_passthrough_and_white_drop() {
        let mut strip: RgbStrip<_, 16> = RgbStrip::new(ScriptedDriver::new(), 4);
        strip.set_pixel(0, 1, 2, 3);
        strip.set_pixel_w(1, 4, 5, 6, 200);
        assert_eq!(strip.frame()[0], Rgb::new(1, 2, 3));
        assert_eq!(strip.frame()[1], Rgb::new(4, 5, 6));
    }

    #[test]
    fn test_out_of_range_writes_ignored() {
        let mut strip: RgbStrip<_, 16> = RgbStrip::new(ScriptedDriver::new(), 4);
        strip.set_pixel(4, 9, 9, 9);
        strip.set_pixel(400, 9, 9, 9);
        assert!(strip.frame().iter().all(|px| *px == Rgb::new(0, 0, 0)));
    }

    #[test]
    fn test_brightness_scales_writes() {
        let mut strip: RgbStrip<_, 16> = RgbStrip::new(ScriptedDriver::new(), 4);
        strip.set_brightness(128);
        strip.set_pixel(0, 255, 128, 0);
        assert_eq!(strip.frame()[0], Rgb::new(128, 64, 0));

        strip.set_brightness(255);
        strip.set_pixel(1, 255, 128, 0);
        assert_eq!(strip.frame()[1], Rgb::new(255, 128, 0));
    }

    #[test]
    fn test_pixel_count_clamped_to_capacity() {
        let strip: RgbStrip<_, 8> = RgbStrip::new(ScriptedDriver::new(), 100);
        assert_eq!(strip.pixel_count(), 8);
    }

    #[test]
    fn test_render_goes_through_driver() {
        let mut strip: RgbStrip<_, 16> = RgbStrip::new(ScriptedDriver::new(), 4);
        assert!(strip.can_render());
        strip.render();
        assert_eq!(strip.driver().frames_shown, 1);

        strip.driver_mut().ready = false;
        assert!(!strip.can_render());
    }

    #[test]
    fn test_rgbw_strip_synthesizes_white() {
        let mut strip: RgbwStrip<_, 16> = RgbwStrip::new(ScriptedDriver::new(), 4, full_params());
        strip.set_pixel(0, 255, 255, 255);
        assert_eq!(strip.frame()[0], Rgbw::new(0, 0, 0, 255));
        strip.set_pixel(1, 255, 0, 0);
        assert_eq!(strip.frame()[1], Rgbw::new(255, 0, 0, 0));
    }

    #[test]
    fn test_rgbw_strip_explicit_white_bypasses_conversion() {
        let mut strip: RgbwStrip<_, 16> =
            RgbwStrip::new(ScriptedDriver::new(), 4, CalibrationParams::default());
        strip.set_pixel_w(0, 10, 20, 30, 40);
        assert_eq!(strip.frame()[0], Rgbw::new(10, 20, 30, 40));
    }

    #[test]
    fn test_rgbw_strip_brightness_applies_before_conversion() {
        let mut strip: RgbwStrip<_, 16> = RgbwStrip::new(ScriptedDriver::new(), 4, full_params());
        strip.set_brightness(128);
        strip.set_pixel(0, 255, 255, 255);
        assert_eq!(strip.frame()[0], Rgbw::new(0, 0, 0, 128));
        strip.set_pixel_w(1, 255, 255, 255, 255);
        assert_eq!(strip.frame()[1], Rgbw::new(128, 128, 128, 128));
    }

    #[test]
    fn test_rgbw_strip_recalibration() {
        let mut strip: RgbwStrip<_, 16> = RgbwStrip::new(ScriptedDriver::new(), 4, full_params());
        strip.set_pixel(0, 200, 200, 200);
        assert_eq!(strip.frame()[0], Rgbw::new(0, 0, 0, 200));

        strip.apply_calibration(CalibrationParams {
            gain: 0,
            red: 0,
            green: 0,
            blue: 0,
        });
        strip.set_pixel(1, 200, 200, 200);
        // zero contribution tables: no white extracted at all
        assert_eq!(strip.frame()[1], Rgbw::new(200, 200, 200, 0));
    }

    #[test]
    fn test_clocked_strip_full_luminance_for_rgb_writes() {
        let mut strip: ClockedStrip<_, 16> = ClockedStrip::new(ScriptedDriver::new(), 4);
        strip.set_pixel(0, 1, 2, 3);
        assert_eq!(strip.frame()[0], Rgbw::new(1, 2, 3, MAX_LUMINANCE));
    }

    #[test]
    fn test_clocked_strip_clamps_luminance() {
        let mut strip: ClockedStrip<_, 16> = ClockedStrip::new(ScriptedDriver::new(), 4);
        strip.set_pixel_w(0, 1, 2, 3, 200);
        assert_eq!(strip.frame()[0].w, MAX_LUMINANCE);
        strip.set_pixel_w(1, 1, 2, 3, 7);
        assert_eq!(strip.frame()[1].w, 7);
    }

    #[test]
    fn test_clocked_strip_scales_colors_not_luminance() {
        let mut strip: ClockedStrip<_, 16> = ClockedStrip::new(ScriptedDriver::new(), 4);
        strip.set_brightness(128);
        strip.set_pixel_w(0, 255, 255, 255, 20);
        assert_eq!(strip.frame()[0], Rgbw::new(128, 128, 128, 20));
    }

    #[test]
    fn test_from_config_applies_count_and_brightness() {
        let config = StripConfig {
            pixel_count: 3,
            brightness: 128,
            ..StripConfig::default()
        };
        let mut strip: RgbStrip<_, 16> = RgbStrip::from_config(ScriptedDriver::new(), &config);
        assert_eq!(strip.pixel_count(), 3);
        strip.set_pixel(0, 255, 255, 255);
        assert_eq!(strip.frame()[0], Rgb::new(128, 128, 128));
    }
}
