use plotters::prelude::*;
use rand::Rng;
use vorosweep::{BoundingBox, Diagram};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filename = "diagram.svg";
    let root = SVGBackend::new(filename, (1024, 1024)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut diagram = Diagram::new(BoundingBox::new(0.0, 0.0, 100.0, 100.0));
    let bounds = *diagram.bounds();
    let mut chart = ChartBuilder::on(&root)
        .build_cartesian_2d(bounds.min_x..bounds.max_x, bounds.min_y..bounds.max_y)?;

    let mut rng = rand::thread_rng();
    let mut sites = Vec::with_capacity(200 * 2);
    for _ in 0..200 {
        sites.push(rng.gen_range(0.0..100.0));
        sites.push(rng.gen_range(0.0..100.0));
    }
    diagram.set_sites(&sites);
    diagram.calculate();

    // Draw bounding box
    chart.draw_series(std::iter::once(PathElement::new(
        vec![
            (bounds.min_x, bounds.min_y),
            (bounds.max_x, bounds.min_y),
            (bounds.max_x, bounds.max_y),
            (bounds.min_x, bounds.max_y),
            (bounds.min_x, bounds.min_y),
        ],
        BLACK.stroke_width(2),
    )))?;

    // Draw cells
    for cell in diagram.cells() {
        let vertices = cell.vertices();
        if vertices.len() < 6 {
            continue;
        }

        let mut poly = Vec::new();
        for j in 0..(vertices.len() / 2) {
            poly.push((vertices[j * 2], vertices[j * 2 + 1]));
        }

        chart.draw_series(std::iter::once(Polygon::new(
            poly.clone(),
            BLUE.mix(0.1).filled(),
        )))?;

        poly.push(poly[0]);
        chart.draw_series(std::iter::once(PathElement::new(poly, BLACK.mix(0.5))))?;
    }

    // Draw sites
    let points: Vec<(f64, f64)> = sites.chunks(2).map(|c| (c[0], c[1])).collect();
    chart.draw_series(points.iter().map(|&p| Circle::new(p, 2, RED.filled())))?;

    root.present()?;
    println!("Output saved to {}", filename);
    Ok(())
}
