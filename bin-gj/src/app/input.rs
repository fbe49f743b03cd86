use std::io::{self, BufRead, Write};
use std::str::FromStr;
use gj_matrix::dense::Mat;
use crate::app::err::*;

pub const MAX_SIZE: usize = 10;

pub fn read_matrix() -> Result<Mat<f64>, Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    read_matrix_from(&mut stdin.lock())
}

pub fn read_matrix_from<B>(input: &mut B) -> Result<Mat<f64>, Box<dyn std::error::Error>>
where B: BufRead {
    let rows: usize = prompt(input, &format!("Number of rows (max {MAX_SIZE}): "))?;
    let cols: usize = prompt(input, &format!("Number of columns (max {MAX_SIZE}): "))?;

    ensure!(
        rows <= MAX_SIZE && cols <= MAX_SIZE,
        "matrix dimensions must be at most {MAX_SIZE}x{MAX_SIZE}."
    );

    println!("Enter the matrix entries:");

    let mut data = Vec::with_capacity(rows * cols);
    for i in 0..rows {
        for j in 0..cols {
            let x: f64 = prompt(input, &format!("Entry [{}, {}]: ", i + 1, j + 1))?;
            data.push(x);
        }
    }

    Ok(Mat::from_data((rows, cols), data))
}

fn prompt<B, T>(input: &mut B, msg: &str) -> Result<T, Box<dyn std::error::Error>>
where B: BufRead, T: FromStr {
    print!("{msg}");
    io::stdout().flush()?;

    let mut line = String::new();
    let n = input.read_line(&mut line)?;
    ensure!(n > 0, "unexpected end of input");

    let s = line.trim();
    if let Ok(v) = s.parse::<T>() {
        Ok(v)
    } else {
        err!("invalid input: '{}'", s)
    }
}
