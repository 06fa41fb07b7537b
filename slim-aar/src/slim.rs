//! The slimming pass: rebuild `classes.jar`, copy the rest of the AAR and
//! append resource folders.

use crate::config::SlimConfig;
use crate::filter::ClassFilter;
use crate::resources::collect_resource_files;
use crate::Result;
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, Cursor, Read, Seek, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, DateTime, ZipArchive, ZipWriter};

/// Entry of the AAR holding the compiled classes.
pub const CLASSES_JAR: &str = "classes.jar";

/// What a run kept, dropped and added.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SlimReport {
    /// Entries of `classes.jar` carried over, directories included.
    pub classes_kept: usize,
    pub classes_dropped: usize,
    /// Top-level AAR entries copied unchanged.
    pub entries_copied: usize,
    pub resources_added: usize,
    /// Entries not written because the name was already in the output.
    pub duplicates_skipped: usize,
}

// Fixed timestamps keep reruns on the same inputs byte-identical.
fn deflated() -> FileOptions {
    FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
}

/// Output archive that refuses to write the same entry name twice.
struct AarWriter<W: Write + Seek> {
    zip: ZipWriter<W>,
    written: HashSet<String>,
}

impl<W: Write + Seek> AarWriter<W> {
    fn new(inner: W) -> Self {
        Self {
            zip: ZipWriter::new(inner),
            written: HashSet::new(),
        }
    }

    /// Writes `name` with the contents of `reader`. Returns false when the
    /// name was already written.
    fn add(&mut self, name: &str, is_dir: bool, reader: &mut impl Read) -> Result<bool> {
        if !self.written.insert(name.to_string()) {
            tracing::warn!("Skipping duplicate entry {}", name);
            return Ok(false);
        }
        if is_dir {
            self.zip.add_directory(name, deflated())?;
        } else {
            self.zip.start_file(name, deflated())?;
            io::copy(reader, &mut self.zip)?;
        }
        Ok(true)
    }

    fn finish(mut self) -> Result<W> {
        Ok(self.zip.finish()?)
    }
}

/// Rebuilds a `classes.jar` keeping only the entries `filter` accepts.
///
/// Kept entries are copied byte for byte and re-compressed with deflate.
/// Everything else is dropped silently.
pub fn slim_classes_jar(
    jar: &[u8],
    filter: &ClassFilter,
    report: &mut SlimReport,
) -> Result<Vec<u8>> {
    let mut classes = ZipArchive::new(Cursor::new(jar))?;
    let mut slim = AarWriter::new(Cursor::new(Vec::new()));

    for i in 0..classes.len() {
        let mut entry = classes.by_index(i)?;
        let name = entry.name().to_string();
        if !filter.accepts(&name) {
            tracing::trace!("Dropping {}", name);
            report.classes_dropped += 1;
            continue;
        }
        let is_dir = entry.is_dir();
        if slim.add(&name, is_dir, &mut entry)? {
            report.classes_kept += 1;
        } else {
            report.duplicates_skipped += 1;
        }
    }

    Ok(slim.finish()?.into_inner())
}

/// Runs the whole pass described by `config` and writes the output AAR.
///
/// The output holds, in order: the slimmed `classes.jar`, every other entry of
/// the input AAR, then the files of each resource folder under `res/`.
pub fn slim_aar(config: &SlimConfig) -> Result<SlimReport> {
    let mut report = SlimReport::default();

    let mut aar = ZipArchive::new(File::open(&config.input)?)?;
    let mut jar = Vec::new();
    aar.by_name(CLASSES_JAR)?.read_to_end(&mut jar)?;
    let slim_jar = slim_classes_jar(&jar, &config.filter, &mut report)?;
    tracing::info!(
        "Kept {} of {} classes.jar entries under {}",
        report.classes_kept,
        report.classes_kept + report.classes_dropped,
        config.filter.prefix()
    );

    let mut out = AarWriter::new(File::create(&config.output)?);
    out.add(CLASSES_JAR, false, &mut slim_jar.as_slice())?;

    for i in 0..aar.len() {
        let mut entry = aar.by_index(i)?;
        let name = entry.name().to_string();
        if name == CLASSES_JAR {
            continue;
        }
        let is_dir = entry.is_dir();
        if out.add(&name, is_dir, &mut entry)? {
            report.entries_copied += 1;
        } else {
            report.duplicates_skipped += 1;
        }
    }
    tracing::info!("Copied {} entries from {}", report.entries_copied, config.input.display());

    for (i, folder) in config.res_folders.iter().enumerate() {
        let files = collect_resource_files(folder, i + 1)?;
        tracing::debug!("Adding {} resource files from {}", files.len(), folder.display());
        for file in files {
            let mut source = File::open(&file.source)?;
            if out.add(&file.entry_name, false, &mut source)? {
                report.resources_added += 1;
            } else {
                report.duplicates_skipped += 1;
            }
        }
    }

    out.finish()?;
    tracing::info!(
        "Wrote {} ({} resource files from {} folders)",
        config.output.display(),
        report.resources_added,
        config.res_folders.len()
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn jar(entries: &[&str]) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for name in entries {
            if name.ends_with('/') {
                zip.add_directory(*name, FileOptions::default()).unwrap();
            } else {
                zip.start_file(*name, FileOptions::default()).unwrap();
                zip.write_all(name.as_bytes()).unwrap();
            }
        }
        zip.finish().unwrap().into_inner()
    }

    fn names(bytes: &[u8]) -> Vec<String> {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect()
    }

    fn sorted_names(bytes: &[u8]) -> Vec<String> {
        let mut names = names(bytes);
        names.sort();
        names
    }

    #[test]
    fn keeps_only_allowlisted_classes() {
        let filter = ClassFilter::new("com/example/").unwrap();
        let input = jar(&["com/example/Foo.class", "com/example/R.class", "other/Bar.class"]);
        let mut report = SlimReport::default();

        let slim = slim_classes_jar(&input, &filter, &mut report).unwrap();

        assert_eq!(names(&slim), vec!["com/example/Foo.class".to_string()]);
        assert_eq!(report.classes_kept, 1);
        assert_eq!(report.classes_dropped, 2);
    }

    #[test]
    fn keeps_matching_directories_and_bytes() {
        let filter = ClassFilter::new("com/example").unwrap();
        let input = jar(&[
            "com/",
            "com/example/",
            "com/example/ui/View$1.class",
            "com/example/R$layout.class",
        ]);
        let mut report = SlimReport::default();

        let slim = slim_classes_jar(&input, &filter, &mut report).unwrap();

        assert_eq!(
            sorted_names(&slim),
            vec!["com/example/".to_string(), "com/example/ui/View$1.class".to_string()]
        );
        let mut archive = ZipArchive::new(Cursor::new(slim.as_slice())).unwrap();
        let mut contents = String::new();
        archive
            .by_name("com/example/ui/View$1.class")
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        assert_eq!(contents, "com/example/ui/View$1.class");
        assert!(archive.by_name("com/example/").unwrap().is_dir());
    }

    #[test]
    fn malformed_jar_is_zip_error() {
        let filter = ClassFilter::new("com/").unwrap();
        let err = slim_classes_jar(b"not a jar", &filter, &mut SlimReport::default()).unwrap_err();
        assert!(matches!(err, crate::Error::Zip(_)));
    }

    #[test]
    fn duplicate_names_are_written_once() {
        let mut writer = AarWriter::new(Cursor::new(Vec::new()));
        assert!(writer.add("res/drawable/icon.png", false, &mut &b"first"[..]).unwrap());
        assert!(!writer.add("res/drawable/icon.png", false, &mut &b"second"[..]).unwrap());
        let bytes = writer.finish().unwrap().into_inner();

        let mut archive = ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        assert_eq!(archive.len(), 1);
        let mut contents = String::new();
        archive.by_index(0).unwrap().read_to_string(&mut contents).unwrap();
        assert_eq!(contents, "first");
    }
}
