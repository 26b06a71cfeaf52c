//! Integration tests for the processing engine

mod error_handling;

use std::fmt::Write as _;

/// Build one valid 12-token LDS 1.04 record line
pub fn lds104_line(shot_number: i64, latitude: f64) -> String {
    format!(
        "1280903110 {} 80337.502 310.84538 {:.5} 120.31 310.84539 {:.5} 119.87 310.84537 {:.5} 121.12",
        shot_number, latitude, latitude, latitude
    )
}

/// Build one valid 42-token LDS 2.0.2 record line
pub fn lds202_line(shot_number: i64, latitude: f64) -> String {
    let mut line = format!("1280903110 {} 80337.502", shot_number);

    // Low / Top / High coordinate triplets
    for elevation in [119.87, 121.45, 121.12] {
        write!(line, " 310.84538 {:.5} {}", latitude, elevation).unwrap();
    }

    // 23 RH percentiles
    for i in 0..23 {
        write!(line, " {:.2}", 0.25 * i as f64).unwrap();
    }

    // Azimuth, incident angle, range, complexity, three channel flags
    line.push_str(" 180.5 2.1 2501.3 0.85 1 1 2");
    line
}

#[test]
fn test_synthetic_line_widths() {
    assert_eq!(lds104_line(1, 68.5).split_whitespace().count(), 12);
    assert_eq!(lds202_line(1, 68.5).split_whitespace().count(), 42);
}
