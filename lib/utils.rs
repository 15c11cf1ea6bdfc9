//! Filesystem helpers for writing output arrays.

pub use ndarray_npy::NpzWriter;

/// Create a directory and all of its parents, if they don't already exist.
///
/// Evaluates to a `std::io::Result<()>`.
#[macro_export]
macro_rules! mkdir {
    ( $path:expr ) => {
        std::fs::create_dir_all(&$path)
    }
}

/// Write a collection of named arrays to a single `.npz` archive.
///
/// ```ignore
/// write_npz!(
///     outdir.join("data.npz"),
///     arrays: {
///         "samples" => &samples,
///         "energies" => &energies,
///     }
/// )?;
/// ```
/// Evaluates to a `Result<(), EdError>`.
#[macro_export]
macro_rules! write_npz {
    (
        $filename:expr,
        arrays: { $( $name:expr => $array:expr ),* $(,)? }
    ) => {
        (|| -> Result<(), $crate::error::EdError> {
            let mut npz = $crate::utils::NpzWriter::new(
                std::fs::File::create($filename)?
            );
            $( npz.add_array($name, $array)?; )*
            npz.finish()?;
            Ok(())
        })()
    }
}
