/*!
Invocation gateway.

Turns a named operation plus a JSON parameter object into one run of the
external `cursor-tools` program:

  raw params -> catalog validation -> encoding (argument vector, execution
  directory) -> process runner -> `InvocationSuccess` / `InvocationError`

Both transports (MCP over stdio, HTTP/JSON) go through `Gateway::invoke`, so
they share validation, encoding and working-directory semantics exactly.
*/

pub mod catalog;
pub mod encoder;
pub mod error;
pub mod invocation;
pub mod process;
pub mod workspace;

pub use catalog::{Catalog, CommandSpec};
pub use error::{DirectoryError, InvocationError};
pub use invocation::{Gateway, InvocationSuccess};
pub use process::CommandRunner;
pub use workspace::WorkspaceStore;
