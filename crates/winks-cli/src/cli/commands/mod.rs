//! CLI command handlers, one file per command.

mod add;
mod edit;
mod generate;
mod import;
mod list;
mod remove;
mod vocabulary;

pub use add::{run_add, NewLink};
pub use edit::{run_edit, EditArgs};
pub use generate::{run_completions, run_man, run_pin_hash};
pub use import::{run_import, run_migrate};
pub use list::{run_list, ListArgs};
pub use remove::run_remove;
pub use vocabulary::{
    run_classification_delete, run_classification_list, run_tag_delete, run_tag_list,
};

use winks_core::link_meta::parse_tag_str;

/// Flattens `-t a,b -t c` into individual tag names.
pub(crate) fn split_tag_args(args: &[String]) -> Vec<String> {
    args.iter().flat_map(|a| parse_tag_str(a)).collect()
}
