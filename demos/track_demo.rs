//! Walks a short hike above Bern through the tracking pipeline

use altitool::{
    describe_fix, project, GeodeticFix, LocationFix, TextFormatter, TrackingSession, UpdateFormatter,
};

fn main() {
    println!("=== Altitude Tracker Demo ===\n");

    let hike = [
        (0, 46.9480, 7.4474, 540.0),
        (60_000, 46.9466, 7.4497, 556.5),
        (120_000, 46.9441, 7.4521, 581.0),
        (180_000, 46.9420, 7.4540, 572.3),
        (240_000, 46.9398, 7.4567, 603.8),
    ];

    let origin = GeodeticFix::new(46.9480, 7.4474, 540.0);
    let start = project(origin);
    println!("Start {} -> x={:.2} m, y={:.2} m, z={:.2} m\n", describe_fix(Some(&origin)), start.x, start.y, start.z);

    let mut session = TrackingSession::new();
    session.start();

    let formatter = UpdateFormatter::new();
    let text = TextFormatter::compact();

    for (offset_ms, lat, lon, alt) in hike {
        let fix = LocationFix::new(GeodeticFix::new(lat, lon, alt), 1_700_000_000_000 + offset_ms)
            .with_accuracy(4.0)
            .with_vertical_accuracy(6.0);

        if let Some(update) = session.update(fix) {
            println!("{}", text.format_text(&formatter.format(&update)));
        }
    }

    println!("\n{}", text.format_summary(&session.totals(), session.fix_count()));
    session.stop();
}
