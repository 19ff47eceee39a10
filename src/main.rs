use std::env;
use std::io;
use std::time::Instant;

use voigtian::likelihood::negative_log_likelihood;
use voigtian::prelude::*;
use voigtian::{gridspace, text, trapz, DoubleSidedVoigtianConfig, ObservableRange};

fn main() -> io::Result<()> {
    let range = match ObservableRange::new(0.0, 25.0) {
        Ok(range) => range,
        Err(err) => {
            println!("Encountered error {:?}", err);
            return Ok(());
        }
    };
    let config = DoubleSidedVoigtianConfig::for_resonance(7.0, range.max);
    let shape = match config.initial_shape() {
        Ok(shape) => shape,
        Err(err) => {
            println!("Encountered error {:?}", err);
            return Ok(());
        }
    };
    println!("Shape {:?}", shape);

    let xs = gridspace(range.min, range.max, 0.01);
    let start = Instant::now();
    let ys = shape.predict(&xs);
    println!(
        "Evaluating {} points took microseconds {}",
        xs.len(),
        (Instant::now() - start).as_micros()
    );
    for (x, y) in xs.iter().zip(ys.iter()).step_by(100) {
        println!("\t{x:0.2}\t{y:0.6}");
    }

    let start = Instant::now();
    match shape.normalized(range) {
        Ok(pdf) => {
            println!(
                "Normalization {} took microseconds {}",
                pdf.normalization(),
                (Instant::now() - start).as_micros()
            );
            println!("Trapezoid estimate over the grid {}", trapz(&xs, &ys));
            match negative_log_likelihood(&pdf, &xs) {
                Ok(nll) => println!("NLL of the grid {nll}"),
                Err(err) => println!("Encountered error {:?}", err),
            }
        }
        Err(err) => println!("Encountered error {:?}", err),
    };

    if let Some(path) = env::args().nth(1) {
        text::to_file(&xs, &ys, &path)?;
        println!("Wrote curve to {path}");
    }
    Ok(())
}
