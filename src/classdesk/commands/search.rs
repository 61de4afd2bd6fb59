use crate::commands::{CmdMessage, CmdResult};
use crate::directory::StudentDirectory;
use crate::error::Result;
use crate::store::KeyValueStore;

pub fn run<S: KeyValueStore>(directory: &mut StudentDirectory<S>, term: &str) -> Result<CmdResult> {
    let listed = directory.search(term).to_vec();
    let mut result = CmdResult::default();
    if listed.is_empty() && !term.is_empty() {
        result.add_message(CmdMessage::info(format!("No students match \"{}\".", term)));
    }
    Ok(result.with_listed_students(listed))
}
