use std::{fs, path::Path};

use tracing::info;

use crate::{
    error::{Error, Result},
    types::Data,
};

/// Writes the end-of-episode portfolio values of a whole run in one go
pub fn write_portfolio_values(path: &Path, values: &Data) -> Result<()> {
    let bytes = postcard::to_stdvec(values)?;
    fs::write(path, bytes).map_err(|e| Error::io(path, e))?;

    info!(
        episodes = values.len(),
        path = %path.display(),
        "saved portfolio values"
    );
    Ok(())
}

pub fn read_portfolio_values(path: &Path) -> Result<Data> {
    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
    Ok(postcard::from_bytes(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_are_read_back_in_episode_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("201401010101-train.bin");
        let values = vec![19_500., 20_250.5, 21_000.];

        write_portfolio_values(&path, &values).unwrap();

        assert_eq!(read_portfolio_values(&path).unwrap(), values);
    }

    #[test]
    fn writing_into_a_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing/run-test.bin");

        let err = write_portfolio_values(&path, &vec![1.]).unwrap_err();

        assert!(matches!(err, Error::Io { .. }));
    }
}
