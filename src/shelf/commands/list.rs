use crate::commands::CmdResult;
use crate::error::Result;
use crate::library::Library;
use crate::store::DataStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookFilter {
    #[default]
    All,
    Available,
    Issued,
}

pub fn run<S: DataStore>(library: &Library<S>, filter: BookFilter) -> Result<CmdResult> {
    let listed = library
        .list()
        .iter()
        .filter(|b| match filter {
            BookFilter::All => true,
            BookFilter::Available => b.is_available(),
            BookFilter::Issued => b.issued,
        })
        .cloned()
        .collect();
    Ok(CmdResult::default().with_listed_books(listed))
}
