mod directory;
mod error;
mod eval;
mod host;
mod parser;
mod query;

pub use directory::{Atom, Directory, PATH_ENV, directory_path};
pub use error::{EvalError, LoadError, MalformedLine};
pub use host::{Host, HostSpec};
pub use parser::{Line, classify};
pub use query::{NameKind, Usage};
