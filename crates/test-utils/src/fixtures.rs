//! Common test fixtures for thermal rendering tests.

/// Temperature ranges that exercise legend layout.
pub mod ranges {
    /// Typical indoor scene.
    pub const ROOM: (f32, f32) = (19.5, 36.8);

    /// Widest range the sensor reports.
    pub const SENSOR_EXTREMES: (f32, f32) = (-40.0, 300.0);

    /// Extreme magnitudes with long labels.
    pub const WIDE: (f32, f32) = (-40.0, 150.0);

    /// Degenerate range, all three labels identical.
    pub const ZERO: (f32, f32) = (0.0, 0.0);

    /// Degenerate range away from zero.
    pub const CONSTANT_25: (f32, f32) = (25.0, 25.0);

    /// Very large magnitudes, wider labels than any real frame.
    pub const HUGE: (f32, f32) = (-123_456.0, 987_654.0);

    /// Every fixture, for table-driven tests.
    pub const ALL: [(f32, f32); 6] = [ROOM, SENSOR_EXTREMES, WIDE, ZERO, CONSTANT_25, HUGE];
}

/// Display resolutions used by the service entry points.
pub mod display {
    pub const SMALL: (u32, u32) = (320, 240);
    pub const LARGE: (u32, u32) = (640, 480);

    /// Legend strip height added below thermal frames.
    pub const LEGEND_HEIGHT: u32 = 40;
}

/// Upstream webcam service credentials used in tests.
pub mod webcam {
    pub const FINGERPRINT: &str = "test-fingerprint-0001";
    pub const TOKEN: &str = "test-token-abcdef";
    pub const URL: &str = "http://127.0.0.1:9/api/webcam/snapshot";
}

/// A minimal valid 2x2 24-bit BMP (blue, green / red, white).
pub fn tiny_bmp() -> Vec<u8> {
    let mut bmp = Vec::new();
    // File header
    bmp.extend_from_slice(b"BM");
    bmp.extend_from_slice(&70u32.to_le_bytes()); // file size
    bmp.extend_from_slice(&0u32.to_le_bytes()); // reserved
    bmp.extend_from_slice(&54u32.to_le_bytes()); // pixel data offset
    // BITMAPINFOHEADER
    bmp.extend_from_slice(&40u32.to_le_bytes());
    bmp.extend_from_slice(&2i32.to_le_bytes()); // width
    bmp.extend_from_slice(&2i32.to_le_bytes()); // height (bottom-up)
    bmp.extend_from_slice(&1u16.to_le_bytes()); // planes
    bmp.extend_from_slice(&24u16.to_le_bytes()); // bpp
    bmp.extend_from_slice(&0u32.to_le_bytes()); // BI_RGB
    bmp.extend_from_slice(&16u32.to_le_bytes()); // image size
    bmp.extend_from_slice(&2835i32.to_le_bytes());
    bmp.extend_from_slice(&2835i32.to_le_bytes());
    bmp.extend_from_slice(&0u32.to_le_bytes());
    bmp.extend_from_slice(&0u32.to_le_bytes());
    // Bottom row: red, white (BGR) + 2 bytes padding
    bmp.extend_from_slice(&[0, 0, 255, 255, 255, 255, 0, 0]);
    // Top row: blue, green (BGR) + 2 bytes padding
    bmp.extend_from_slice(&[255, 0, 0, 0, 255, 0, 0, 0]);
    bmp
}
