//! Demonstration of VoronoiDiagram generation and usage
//!
//! Run with `RUST_LOG=debug` to see relaxation and construction timings.

use rust_voronoi_plane::*;

fn main() -> Result<()> {
    env_logger::init();

    println!("Generating diagram...");

    let config = DiagramConfigBuilder::new()
        .seed(42)
        .site_count(200)
        .relaxation_passes(5)
        .relaxation_factor(2e-5)?
        .bucket_divisions(6)?
        .build()?;

    let counter = CallCounter::new();
    let diagram = VoronoiDiagram::generate_with_collector(config, &counter)?;

    println!("Generated {} cells", diagram.cell_count());
    println!("Total area: {:.6} (bounds {:.6})", diagram.total_area(), diagram.bounds().area());

    // Show polygon complexity distribution
    let mut counts = std::collections::BTreeMap::new();
    for cell in diagram.cells() {
        *counts.entry(cell.vertex_count()).or_insert(0) += 1;
    }

    println!("\nVertex counts:");
    for (vertices, count) in &counts {
        let pct = (*count as f64 / diagram.cell_count() as f64) * 100.0;
        println!("  {:2}: {} ({:.1}%)", vertices, count, pct);
    }

    println!("\nCall counts:");
    for (op, count) in counter.report() {
        println!("  {}: {}", op.name(), count);
    }

    #[cfg(feature = "spatial-index")]
    {
        let pos = DVec2::new(0.5, 0.5);
        if let Some(id) = diagram.find_cell_at(pos) {
            println!("\nPosition {} is in cell {}", pos, id);
            if let Some(cell) = diagram.get_cell(id) {
                println!("Cell {} has area {:.6}", id, cell.area());
            }
        }
    }

    let edges = diagram.triangulation();
    println!("\nGreedy triangulation: {} edges", edges.len());

    Ok(())
}
