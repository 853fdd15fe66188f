/// A submodule that provides the balanced-delimiter scan used to find the
/// extent of a block before it is handed to the parser proper.
mod scanner;

/// A submodule that provides the lexer for the table literal grammar.
mod tokenizer;

/// A submodule that provides the parser output objects. Field extraction in
/// [structures](crate::structures) works against these instead of running
/// per-field text scans, so one grammar covers every nesting depth.
mod table_object;
pub use table_object::{
    ConversionError, KeyError, TableArray, TableMap, TableMapping, TableObject, TableObjectError,
    TableString, TableValue,
};

/// A submodule that provides the [Section] object, a named slice of the dump
/// that parses into a [TableObject] on demand.
mod section;
pub use section::{Section, SectionError};

/// A submodule that provides the readers which stream sections and numbered
/// records out of the dump in order of appearance.
mod section_reader;
pub use section_reader::{ReaderError, RecordReader, SectionReader};

/// A submodule that provides the [DumpFile] object holding the dump contents.
mod dump_file;
pub use dump_file::DumpFile;
