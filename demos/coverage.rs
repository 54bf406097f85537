use tilecover::{debug_geojson, LatLng, Point, Projection, Tiler};

/// Console walkthrough of the tile coverage computation
fn main() -> tilecover::Result<()> {
    env_logger::init();

    println!("Tilecover coverage demo");
    println!("=======================");

    // Whole world in a 512px viewport at zoom 1
    let proj = Projection::for_viewport(&LatLng::default(), 1.0, Point::new(512.0, 512.0), 256.0);
    let tiler = Tiler::new();
    let grid = tiler.cover(&proj);

    println!("\nWhole world at zoom 1 ({} tiles):", grid.len());
    for tile in grid.iter() {
        println!(
            "   {} visible={} lng {:.1}..{:.1} lat {:.1}..{:.1}",
            tile.id,
            tile.is_visible,
            tile.wgs84_extent.min.x,
            tile.wgs84_extent.max.x,
            tile.wgs84_extent.min.y,
            tile.wgs84_extent.max.y,
        );
    }

    // City viewports with a prefetch margin
    let tiler = Tiler::new().with_margin(1);
    let locations = [
        ("New York", LatLng::new(40.7128, -74.0060), 11.0),
        ("London", LatLng::new(51.5074, -0.1278), 10.0),
        ("Tokyo", LatLng::new(35.6762, 139.6503), 12.0),
    ];

    println!("\nCity viewports (800x600, margin 1):");
    for (name, center, zoom) in locations {
        let proj = Projection::for_viewport(&center, zoom, Point::new(800.0, 600.0), 256.0);
        let grid = tiler.cover(&proj);
        let visible = grid.iter().filter(|t| t.is_visible).count();
        println!(
            "   {} at z{}: {} tiles ({} visible, {} margin)",
            name,
            zoom,
            grid.len(),
            visible,
            grid.len() - visible
        );
    }

    // Null island filtering
    let proj = Projection::for_viewport(&LatLng::default(), 7.0, Point::new(512.0, 512.0), 256.0);
    let kept = Tiler::new().cover(&proj).len();
    let skipped = Tiler::new().with_skip_null_island(true).cover(&proj).len();
    println!("\nNull island at zoom 7: {} tiles normally, {} with skipping", kept, skipped);

    // Debug GeoJSON export
    let grid = Tiler::new().cover(&Projection::for_viewport(
        &LatLng::default(),
        1.0,
        Point::new(512.0, 512.0),
        256.0,
    ));
    let doc = debug_geojson(&grid);
    println!("\nDebug GeoJSON:\n{}", doc.to_json_string()?);

    Ok(())
}
