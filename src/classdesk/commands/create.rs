use crate::commands::{recover, CmdMessage, CmdResult};
use crate::directory::StudentDirectory;
use crate::error::Result;
use crate::model::StudentInput;
use crate::store::KeyValueStore;

pub fn run<S: KeyValueStore>(
    directory: &mut StudentDirectory<S>,
    input: &StudentInput,
) -> Result<CmdResult> {
    let record = match directory.create(input) {
        Ok(record) => record,
        Err(e) => return recover(e),
    };

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Student added ({}): {}",
        record.id, record.name
    )));
    Ok(result
        .with_affected_students(vec![record])
        .with_listed_students(directory.view().to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn reports_new_student() {
        let (mut dir, _) = StudentDirectory::load(InMemoryStore::new()).unwrap();
        let result = run(&mut dir, &StudentInput::new("Meena", "meena@example.com", "91")).unwrap();

        assert_eq!(result.affected_students[0].id, "005");
        assert_eq!(result.listed_students.len(), 5);
        assert!(result.messages[0].content.contains("Student added (005): Meena"));
        assert!(!result.has_errors());
    }

    #[test]
    fn validation_failure_becomes_error_messages() {
        let (mut dir, _) = StudentDirectory::load(InMemoryStore::new()).unwrap();
        let result = run(&mut dir, &StudentInput::new("", "a@b.com", "90")).unwrap();

        assert!(result.has_errors());
        assert!(result.affected_students.is_empty());
        assert_eq!(result.messages.len(), 1);
        assert_eq!(result.messages[0].level, MessageLevel::Error);
        assert_eq!(result.messages[0].content, "Name is required");
        assert_eq!(dir.records().len(), 4);
    }
}
