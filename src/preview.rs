use std::{
    ffi::OsString,
    fs,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use base64::{engine::general_purpose, Engine as _};

use crate::{
    error::Error,
    image::{writer::PngImageWriter, Image, ImageWriter},
    open_output_file,
};

const DATA_URL_PREFIX: &str = "data:image/png;base64,";
const PARTIAL_FILE_SUFFIX: &str = ".part";

/// A rendered duotone, held as PNG bytes.
#[derive(Clone, Debug, PartialEq)]
pub struct Preview {
    width: u32,
    height: u32,
    png: Vec<u8>,
}

impl Preview {
    pub fn encode(image: &Image) -> crate::Result<Self> {
        let mut png = Vec::new();
        PngImageWriter::new(&mut png, image).write_image()?;
        Ok(Self {
            width: image.width(),
            height: image.height(),
            png,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn png_bytes(&self) -> &[u8] {
        &self.png
    }

    pub fn data_url(&self) -> String {
        let mut url = String::with_capacity(DATA_URL_PREFIX.len() + self.png.len() * 4 / 3 + 4);
        url.push_str(DATA_URL_PREFIX);
        general_purpose::STANDARD.encode_string(&self.png, &mut url);
        url
    }

    /// Writes the PNG to `file_path`.
    ///
    /// The bytes go to a `.part` sibling first, which is renamed into place
    /// once complete. A failed write leaves no file behind.
    pub fn save(&self, file_path: &Path) -> crate::Result<()> {
        let partial_path = partial_file_path(file_path);
        let saved = self.write_file(&partial_path, file_path).and_then(|_| {
            fs::rename(&partial_path, file_path)
                .map_err(|e| Error::FailedToWriteOutputFile(file_path.display().to_string(), e))
        });
        if let Err(e) = saved {
            // nothing to clean up when the file was never created
            let _ = fs::remove_file(&partial_path);
            return Err(e);
        }
        log::info!(
            "Wrote {} bytes to '{}'",
            self.png.len(),
            file_path.display()
        );
        Ok(())
    }

    fn write_file(&self, partial_path: &Path, file_path: &Path) -> crate::Result<()> {
        let output_file = open_output_file(partial_path)?;
        let mut writer = BufWriter::new(output_file);
        writer
            .write_all(&self.png)
            .and_then(|_| writer.flush())
            .map_err(|e| Error::FailedToWriteOutputFile(file_path.display().to_string(), e))
    }
}

fn partial_file_path(file_path: &Path) -> PathBuf {
    let mut file_name = file_path
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    file_name.push(PARTIAL_FILE_SUFFIX);
    file_path.with_file_name(file_name)
}

#[cfg(test)]
mod test {
    use std::{env, fs, path::PathBuf};

    use base64::{engine::general_purpose, Engine as _};

    use super::{partial_file_path, Preview};
    use crate::{error::Error, image::Image};

    fn scratch_directory(name: &str) -> PathBuf {
        let directory_name = format!("duotone-preview-{}-{}", name, std::process::id());
        let directory = env::temp_dir().join(directory_name);
        if directory.exists() {
            fs::remove_dir_all(&directory).unwrap();
        }
        fs::create_dir_all(&directory).unwrap();
        directory
    }

    fn example_preview() -> Preview {
        let image = Image::new(2, 2, vec![[20, 85, 39, 255]; 4]).unwrap();
        Preview::encode(&image).unwrap()
    }

    #[test]
    fn encode_keeps_dimensions() {
        let preview = example_preview();
        assert_eq!(preview.width(), 2);
        assert_eq!(preview.height(), 2);
        assert_eq!(&preview.png_bytes()[1..4], b"PNG");
    }

    #[test]
    fn data_url_wraps_png_bytes() {
        let preview = example_preview();
        let url = preview.data_url();
        let payload = url
            .strip_prefix("data:image/png;base64,")
            .expect("data url prefix missing");
        let decoded = general_purpose::STANDARD.decode(payload).unwrap();
        assert_eq!(decoded, preview.png_bytes());
    }

    #[test]
    fn partial_file_sits_next_to_target() {
        let partial = partial_file_path(&PathBuf::from("out/duotone-1.png"));
        assert_eq!(partial, PathBuf::from("out/duotone-1.png.part"));
    }

    #[test]
    fn save_writes_complete_file() {
        let directory = scratch_directory("complete");
        let target = directory.join("duotone.png");
        let preview = example_preview();
        preview.save(&target).unwrap();
        assert_eq!(fs::read(&target).unwrap(), preview.png_bytes());
        assert!(!partial_file_path(&target).exists());
        fs::remove_dir_all(&directory).unwrap();
    }

    #[test]
    fn failed_save_leaves_no_file_behind() {
        let directory = scratch_directory("failed");
        // a non-empty directory cannot be replaced by a file
        let target = directory.join("occupied");
        fs::create_dir_all(target.join("keep")).unwrap();
        let result = example_preview().save(&target);
        assert!(matches!(result, Err(Error::FailedToWriteOutputFile(_, _))));
        assert!(target.is_dir());
        assert!(!partial_file_path(&target).exists());
        fs::remove_dir_all(&directory).unwrap();
    }

    #[test]
    fn save_into_missing_directory_fails() {
        let directory = scratch_directory("missing");
        let target = directory.join("absent").join("duotone.png");
        let result = example_preview().save(&target);
        assert!(matches!(result, Err(Error::UnableToOpenOutputFileForWriting(_, _))));
        assert!(!directory.join("absent").exists());
        fs::remove_dir_all(&directory).unwrap();
    }
}
