//! # Engineering calculator engine
//!
//! The non-visual core of a button-driven engineering calculator: a text
//! buffer that button presses edit, and an evaluator that turns the finished
//! text into a number. A UI layer only has to own a [`session::Session`],
//! forward every button label to it, and show `buffer()` in its display.
//!
//! Button presses are plain text edits. Digits and operators append
//! themselves, function buttons append `name(`, and two buttons edit the
//! tail of the buffer in place:
//! * `%` divides the trailing number by 100 (`200*10` -> `200*0.1`),
//!   or appends `/100` when the buffer does not end with a number
//! * `!` replaces the trailing integer with its factorial (`2*5` -> `2*120`),
//!   calculated exactly with big integers
//!
//! Evaluation is angle-mode aware. In degrees mode every trigonometric call
//! (`sin`, `cos`, `tan` and their inverses) gets its argument wrapped in a
//! `radians(..)` conversion before parsing, so `sin(30)` means thirty
//! degrees; in radians mode the text is evaluated as written.
//!
//! Expressions are parsed with a fixed grammar - numbers, `+`, `-`, `*`,
//! `/`, `**`, brackets, and calls to a closed set of function names:
//! trigonometric and hyperbolic functions, `ln`/`log`/`log10`, `sqrt`,
//! `factorial`, `degrees`, `radians`, and `pow`, plus the constants `pi`
//! and `e`. Any identifier outside that list is an error, so arbitrary
//! text can never resolve to anything executable.
//!
//! Results keep integer math exact (`num-bigint`) and collapse floats that
//! land within `1e-12` of a whole number back to integers, so `4/2` shows
//! `2`, not `2.0`. A successful result becomes the new buffer text and is
//! remembered for the `ANS` button; an error leaves the buffer untouched

#[macro_use]
extern crate pest_derive;

pub mod angle;
pub mod editor;
pub mod errors;
pub mod parse;
pub mod session;
pub mod stack;
pub mod value;
