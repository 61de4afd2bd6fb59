use crate::commands::{recover, CmdMessage, CmdResult};
use crate::directory::{DeleteOutcome, StudentDirectory};
use crate::error::Result;
use crate::model::StudentRecord;
use crate::store::KeyValueStore;

pub fn run<S, F>(directory: &mut StudentDirectory<S>, id: &str, confirm: F) -> Result<CmdResult>
where
    S: KeyValueStore,
    F: FnOnce(&StudentRecord) -> bool,
{
    let outcome = match directory.delete(id, confirm) {
        Ok(outcome) => outcome,
        Err(e) => return recover(e),
    };

    let mut result = CmdResult::default();
    match outcome {
        DeleteOutcome::Deleted(record) => {
            result.add_message(CmdMessage::success(format!(
                "Student deleted ({}): {}",
                record.id, record.name
            )));
            result = result.with_affected_students(vec![record]);
        }
        DeleteOutcome::Cancelled => {
            result.add_message(CmdMessage::info("Operation cancelled."));
        }
    }
    Ok(result.with_listed_students(directory.view().to_vec()))
}
