mod app;
mod completion;
mod doctor;
mod init;
mod install;
mod list;
mod proxy;
mod remote;
mod remove;
mod switch;

pub use app::{App, Commands};

use jdkvm_store::Warning;

fn print_warnings(warnings: &[Warning]) {
    for w in warnings {
        eprintln!("warning: {w}");
    }
}
