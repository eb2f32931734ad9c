// SPDX-License-Identifier: MIT
//
// Shown when the launcher is started from a plain terminal.

pub const INTRO: &str = "\
tmux-complete is meant to be started by a tmux key binding, not from a
shell. Add this line to ~/.tmux.conf:

  bind-key C-Space run -b 'tmux-complete'

then reload the configuration:

  tmux source ~/.tmux.conf

Now Prefix Ctrl+Space completes the word under the cursor from anything
visible in the pane.

Options given in the binding (theme, patterns, --exec) are passed on:

  bind-key C-o run -b 'tmux-complete --no-prefix --exec xdg-open'
";

pub fn print() {
    println!("{INTRO}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intro_shows_binding() {
        assert!(INTRO.contains("bind-key C-Space run -b 'tmux-complete'"));
    }
}
