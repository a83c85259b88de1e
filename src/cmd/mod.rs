/*!
Command dispatcher module.

Only module declarations and re-exports live here; each subcommand keeps its
arguments and logic in its own file.

  src/cmd/
    mod.rs          (this file)
    transport.rs    (Transport enum + helpers)
    serve.rs        (ServeArgs + execute_serve)
    list.rs         (ListArgs  + execute_list)
    exec.rs         (ExecArgs  + execute_exec)
    shared.rs       (--param parsing, param files, coercion)
    format.rs       (header / table / color helpers)

Conventions:
  - Each subcommand module exposes exactly one public `execute_*` function
    that returns `anyhow::Result<()>`.
  - Argument structs derive `clap::Args` and are kept minimal.
*/

pub mod exec;
pub mod format;
pub mod list;
pub mod serve;
pub mod shared;
pub mod transport;

pub use exec::{ExecArgs, execute_exec};
pub use list::{ListArgs, execute_list};
pub use serve::{ServeArgs, execute_serve};
