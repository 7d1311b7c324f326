use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::library::Library;
use crate::store::DataStore;

pub fn run<S: DataStore>(library: &Library<S>) -> Result<CmdResult> {
    let count = library.count_available();
    let mut result = CmdResult::default().with_available(count);
    result.add_message(CmdMessage::info(format!(
        "Number of Available Books: {}",
        count
    )));
    Ok(result)
}
