use crate::commands::{recover, CmdMessage, CmdResult};
use crate::directory::StudentDirectory;
use crate::error::Result;
use crate::model::StudentInput;
use crate::store::KeyValueStore;

pub fn run<S: KeyValueStore>(
    directory: &mut StudentDirectory<S>,
    id: &str,
    input: &StudentInput,
) -> Result<CmdResult> {
    let record = match directory.update(id, input) {
        Ok(record) => record,
        Err(e) => return recover(e),
    };

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Student updated ({}): {}",
        record.id, record.name
    )));
    Ok(result
        .with_affected_students(vec![record])
        .with_listed_students(directory.view().to_vec()))
}
