use crate::member::error::StoreError;
use crate::member::error::StoreError::{
    CantOpenMembersFile, CantReadMembersFile, CantWriteMembersFile,
};
use crate::member::record::{COLUMNS, MemberRecord};
use crate::tools::log_error_and_message;
use derive_getters::Getters;
use log::{debug, error, info};
use std::fs::File;
use std::path::{Path, PathBuf};

type Result<T, E = StoreError> = std::result::Result<T, E>;

const DELIMITER: u8 = b',';

/// All known members, backed by a single spreadsheet file.
///
/// The whole file is loaded once and rewritten in full on each [MemberStore::persist].
/// Nothing prevents another process from writing the same file concurrently.
#[derive(Debug, Getters)]
#[cfg_attr(test, derive(PartialEq))]
pub struct MemberStore {
    file_path: PathBuf,
    records: Vec<MemberRecord>,
}

impl MemberStore {
    /// Load every member from `file_path`.
    /// A missing file results in an empty store, which will create the file on first persist.
    pub fn load(file_path: &Path) -> Result<Self> {
        let records = match std::fs::exists(file_path) {
            Ok(true) => read_records(file_path)?,
            Ok(false) => {
                info!("No members file found at {file_path:?}, starting with an empty list.");
                vec![]
            }
            Err(error) => {
                error!("Members file {file_path:?} is inaccessible.\n{error:#?}");
                return Err(CantOpenMembersFile(file_path.display().to_string()));
            }
        };

        Ok(Self {
            file_path: file_path.to_path_buf(),
            records,
        })
    }

    /// Add a member at the end of the list. Duplicated IDs are accepted.
    pub fn append(&mut self, record: MemberRecord) {
        self.records.push(record);
    }

    /// Overwrite the members file with the current list.
    pub fn persist(&self) -> Result<()> {
        let file = File::create(&self.file_path).map_err(|error| {
            error!("Can't create members file {:?}.\n{error:#?}", self.file_path);
            CantWriteMembersFile(error.to_string())
        })?;
        let mut writer = csv::WriterBuilder::new()
            .delimiter(DELIMITER)
            .has_headers(false)
            .from_writer(file);

        writer
            .write_record(COLUMNS)
            .map_err(|error| CantWriteMembersFile(error.to_string()))?;
        for record in &self.records {
            writer
                .serialize(record)
                .map_err(|error| CantWriteMembersFile(error.to_string()))?;
        }
        writer.flush().map_err(log_error_and_message(
            "Can't flush members file",
            CantWriteMembersFile(format!("{:?} couldn't be flushed", self.file_path)),
        ))?;

        debug!(
            "{} members written to {:?}.",
            self.records.len(),
            self.file_path
        );
        Ok(())
    }
}

fn read_records(file_path: &Path) -> Result<Vec<MemberRecord>> {
    let file = File::open(file_path).map_err(|error| {
        error!("Can't open members file {file_path:?}.\n{error:#?}");
        CantOpenMembersFile(file_path.display().to_string())
    })?;
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .from_reader(file);

    let records = reader
        .deserialize()
        .collect::<std::result::Result<Vec<MemberRecord>, _>>()
        .map_err(|error| {
            error!("Error while reading members file {file_path:?}.\n{error:#?}");
            CantReadMembersFile(error.to_string())
        })?;

    info!("{} members loaded from {file_path:?}.", records.len());
    Ok(records)
}
