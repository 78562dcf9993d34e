//! Plain-text and JSON output.

use std::io::{self, Write};
use todo_core::{Task, TaskSummary};

pub fn write_list(out: &mut impl Write, tasks: &[Task], summary: &TaskSummary) -> io::Result<()> {
    if tasks.is_empty() {
        writeln!(out, "No todos yet.")?;
    }
    for task in tasks {
        let mark = if task.completed { 'x' } else { ' ' };
        writeln!(out, "[{mark}] {}  {}", task.id, task.text)?;
    }
    writeln!(out)?;
    write_summary(out, summary)
}

pub fn write_summary(out: &mut impl Write, summary: &TaskSummary) -> io::Result<()> {
    writeln!(out, "{summary}")
}

pub fn write_json(out: &mut impl Write, tasks: &[Task]) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, tasks)?;
    writeln!(out)
}
