//! Reads sites from stdin and prints each cell's polygon.
//!
//! Input format: the half-extent `n` of the square bounding rectangle
//! `[-n, n] x [-n, n]` on the first line, the site count on the second,
//! then one `x y` line per site.

use std::io::{self, BufRead};
use vorosweep::{BoundingBox, Diagram};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let mut next_line = || -> Result<String, Box<dyn std::error::Error>> {
        Ok(lines.next().ok_or("unexpected end of input")??)
    };

    let n: f64 = next_line()?.trim().parse()?;
    let count: usize = next_line()?.trim().parse()?;

    let mut sites = Vec::with_capacity(count * 2);
    for _ in 0..count {
        let line = next_line()?;
        let pair: Vec<f64> = line
            .split_whitespace()
            .map(str::parse)
            .collect::<Result<_, _>>()?;
        if pair.len() != 2 {
            return Err(format!("bad site line: {}", line).into());
        }
        sites.extend(pair);
    }

    let mut diagram = Diagram::new(BoundingBox::new(-n, -n, n, n));
    diagram.set_sites(&sites);
    diagram.calculate();

    let kept = diagram.sites();
    for i in 0..diagram.count_cells() {
        let cell = diagram.get(i).ok_or("missing cell")?;
        print!(
            "site ({:.3}, {:.3}) area {:.3}:",
            kept[i * 2],
            kept[i * 2 + 1],
            cell.area()
        );
        for v in cell.vertices().chunks_exact(2) {
            print!(" ({:.3}, {:.3})", v[0], v[1]);
        }
        println!();
    }
    Ok(())
}
