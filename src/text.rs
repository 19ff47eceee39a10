use std::fs;
use std::io;
use std::io::prelude::*;
use std::path;

/// Write paired coordinates and densities as two tab-separated columns
pub fn to_file<P: AsRef<path::Path>>(xs: &[f64], ys: &[f64], path: P) -> io::Result<()> {
    let file = fs::File::create(path)?;
    let mut writer = io::BufWriter::new(file);
    write_table(xs, ys, &mut writer)?;
    writer.flush()
}

/// Write paired coordinates and densities as two tab-separated columns to `writer`
pub fn write_table<W: Write>(xs: &[f64], ys: &[f64], writer: &mut W) -> io::Result<()> {
    if xs.len() != ys.len() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "coordinate array length ({}) must equal density length ({})",
                xs.len(),
                ys.len()
            ),
        ));
    }
    for (x, y) in xs.iter().zip(ys.iter()) {
        writer.write_all(format!("{}\t{}\n", x, y).as_bytes())?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_write_table() {
        let mut buf = Vec::new();
        write_table(&[1.0, 2.5], &[0.25, 0.125], &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "1\t0.25\n2.5\t0.125\n");

        let mut buf = Vec::new();
        let err = write_table(&[1.0], &[], &mut buf).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
