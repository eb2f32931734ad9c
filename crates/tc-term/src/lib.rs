// SPDX-License-Identifier: MIT
//
// tc-term — Terminal engine for tmux-complete.
//
// The picker owns a whole tmux window for a few seconds: it enters raw
// mode, paints the captured pane once, and redraws after every key until
// the user accepts or cancels. This crate is the layer underneath that:
// termios and the alternate screen with guaranteed restore, a stdin reader
// thread, a byte-to-key parser, a cell grid, and a renderer that turns the
// grid into ANSI escapes.
//
// Rendering is one cell per codepoint. Pane text arrives pre-wrapped at the
// pane width, so there is no display-width logic here.

pub mod ansi;
pub mod buffer;
pub mod cell;
pub mod color;
pub mod event_loop;
pub mod input;
pub mod reader;
pub mod render;
pub mod terminal;
