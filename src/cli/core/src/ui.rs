/* src/cli/core/src/ui.rs */

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn ok(msg: &str) {
  println!("  {GREEN}\u{2713}{RESET} {msg}");
}

pub fn fail(msg: &str) {
  println!("  {RED}\u{2717}{RESET} {msg}");
}

pub fn warn(msg: &str) {
  println!("  {YELLOW}!{RESET} {msg}");
}

pub fn arrow(msg: &str) {
  println!("  {GREEN}\u{2192}{RESET} {msg}");
}

pub fn detail(msg: &str) {
  println!("        {DIM}{msg}{RESET}");
}

pub fn banner(cmd: &str) {
  println!();
  println!("  {BOLD}hashpage{RESET} {cmd} {DIM}v{VERSION}{RESET}");
  println!();
}

/// "1 route" / "3 routes"
pub fn plural(n: usize, word: &str) -> String {
  if n == 1 { format!("{n} {word}") } else { format!("{n} {word}s") }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn plural_forms() {
    assert_eq!(plural(1, "route"), "1 route");
    assert_eq!(plural(0, "route"), "0 routes");
    assert_eq!(plural(5, "region"), "5 regions");
  }
}
