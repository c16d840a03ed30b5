//! The editing session: one optional image and the commands that act on it.

use std::io::{self, Write};

use pnmedit_core::{
    apply_crop, apply_effect, apply_rotation, binned_histogram, equalize, load_netpbm,
    save_netpbm, EditError, Effect, Image, ImageKind, Selection,
};
use tracing::{debug, info, warn};

use crate::command::Command;

/// What the input loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Holds the currently loaded image, if any, and executes commands on it.
///
/// Every command writes its status lines to the supplied writer.
#[derive(Debug, Default)]
pub struct Session {
    image: Option<Image>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// The loaded image, if any.
    pub fn image(&self) -> Option<&Image> {
        self.image.as_ref()
    }

    /// Execute one command line.
    ///
    /// Blank lines are ignored. Only I/O errors on `out` are returned; every
    /// editing failure is reported as a status line.
    pub fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<Flow> {
        let Some(keyword) = Command::keyword(line) else {
            return Ok(Flow::Continue);
        };

        if keyword != "LOAD" && self.image.is_none() {
            writeln!(out, "No image loaded")?;
            return Ok(Flow::Continue);
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                debug!(line = line.trim_end(), %err, "rejected command line");
                writeln!(out, "{err}")?;
                return Ok(Flow::Continue);
            }
        };

        match command {
            Command::Load { path } => self.load(&path, out)?,
            Command::Exit => {
                self.image = None;
                info!("exiting");
                return Ok(Flow::Exit);
            }
            command => {
                if let Some(image) = self.image.as_mut() {
                    run_on_image(image, command, out)?;
                }
            }
        }
        Ok(Flow::Continue)
    }

    fn load<W: Write>(&mut self, path: &str, out: &mut W) -> io::Result<()> {
        // The previous image is dropped even when the new one fails to load.
        self.image = None;
        match load_netpbm(path) {
            Ok(image) => {
                info!(
                    path,
                    rows = image.rows(),
                    columns = image.columns(),
                    kind = %image.kind(),
                    "image loaded"
                );
                self.image = Some(image);
                writeln!(out, "Loaded {path}")
            }
            Err(err) => {
                warn!(path, error = %err, "load failed");
                writeln!(out, "Failed to load {path}")
            }
        }
    }
}

fn run_on_image<W: Write>(image: &mut Image, command: Command, out: &mut W) -> io::Result<()> {
    match command {
        Command::Save { path, encoding } => match save_netpbm(image, &path, encoding) {
            Ok(()) => writeln!(out, "Saved {path}"),
            Err(err) => {
                warn!(path = %path, error = %err, "save failed");
                writeln!(out, "Failed to save {path}")
            }
        },
        Command::SelectAll => {
            image.select_all();
            writeln!(out, "Selected ALL")
        }
        Command::Select { x1, y1, x2, y2 } => select(image, [x1, y1, x2, y2], out),
        Command::Crop => {
            let selection = image.selection();
            match apply_crop(image, selection) {
                Ok(()) => writeln!(out, "Image cropped"),
                Err(err) => report(out, &err),
            }
        }
        Command::Apply { effect } => {
            if image.kind() == ImageKind::BiLevel {
                return writeln!(out, "Easy, Charlie Chaplin");
            }
            let Ok(parsed) = effect.parse::<Effect>() else {
                return writeln!(out, "APPLY parameter invalid");
            };
            match apply_effect(image, parsed) {
                Ok(()) => writeln!(out, "APPLY {effect} done"),
                Err(err) => report(out, &err),
            }
        }
        Command::Histogram { max_stars, bins } => {
            match binned_histogram(image, max_stars, bins) {
                Ok(histogram) => {
                    for &stars in &histogram.stars {
                        let bar = "*".repeat(stars as usize);
                        writeln!(out, "{stars}\t|\t{bar}")?;
                    }
                    Ok(())
                }
                Err(err) => report(out, &err),
            }
        }
        Command::Equalize => match equalize(image) {
            Ok(()) => writeln!(out, "Equalize done"),
            Err(err) => report(out, &err),
        },
        Command::Rotate { angle } => match apply_rotation(image, angle) {
            Ok(()) => writeln!(out, "Rotated {angle}"),
            Err(err) => report(out, &err),
        },
        Command::Load { .. } | Command::Exit => Ok(()),
    }
}

/// Validate two corners against the image and make them the selection.
///
/// Coordinates are `x` in `0..=columns` and `y` in `0..=rows`; the corners
/// must differ on both axes.
fn select<W: Write>(image: &mut Image, corners: [i64; 4], out: &mut W) -> io::Result<()> {
    let [x1, y1, x2, y2] = corners;
    let in_range = |value: i64, limit: usize| usize::try_from(value).ok().filter(|&v| v <= limit);

    let (Some(x1), Some(y1), Some(x2), Some(y2)) = (
        in_range(x1, image.columns()),
        in_range(y1, image.rows()),
        in_range(x2, image.columns()),
        in_range(y2, image.rows()),
    ) else {
        return writeln!(out, "Invalid set of coordinates");
    };
    if x1 == x2 || y1 == y2 {
        return writeln!(out, "Invalid set of coordinates");
    }

    let selection = Selection::from_corners(x1, y1, x2, y2);
    match image.select(selection) {
        Ok(()) => writeln!(
            out,
            "Selected {} {} {} {}",
            selection.left, selection.top, selection.right, selection.bottom
        ),
        Err(err) => report(out, &err),
    }
}

/// Turn an engine rejection into its status line.
fn report<W: Write>(out: &mut W, err: &EditError) -> io::Result<()> {
    debug!(%err, "command rejected");
    let message = match err {
        EditError::WrongImageKind { .. } => "Black and white image needed",
        EditError::InvalidBins(_) | EditError::InvalidStars(_) => "Invalid set of parameters",
        EditError::UnsupportedAngle(_) => "Unsupported rotation angle",
        EditError::SelectionNotSquare { .. } => "The selection must be square",
        EditError::InvalidSelection { .. } => "Invalid set of coordinates",
        EditError::SampleCount { .. } => "Invalid command",
    };
    writeln!(out, "{message}")
}
