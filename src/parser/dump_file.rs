use std::{
    fs::File,
    io::{self, Read},
    path::Path,
};

use super::section_reader::SectionReader;

/// The election data dump. Just a wrapper around the file contents, so that
/// the readers can hand out sections as slices without copying. The whole
/// input is read up front; there is no streaming.
pub struct DumpFile {
    contents: String,
}

impl DumpFile {
    /// Open a dump file from disk. Missing files and undecodable contents
    /// surface as [io::Error] for the caller to report.
    pub fn open<P: AsRef<Path>>(filename: P) -> Result<DumpFile, io::Error> {
        let mut file = File::open(filename)?;
        DumpFile::read(&mut file)
    }

    /// Create a DumpFile from any reader. The contents must be UTF-8.
    pub fn read<R: Read>(reader: &mut R) -> Result<DumpFile, io::Error> {
        let mut contents = String::new();
        reader.read_to_string(&mut contents)?;
        Ok(DumpFile { contents })
    }

    /// The size of the dump in bytes.
    pub fn len(&self) -> usize {
        self.contents.len()
    }

    /// Iterate over the top level sections of the dump.
    pub fn sections(&self) -> SectionReader<'_> {
        SectionReader::new(&self.contents)
    }
}
