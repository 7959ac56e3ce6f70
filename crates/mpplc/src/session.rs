//! The per-file compilation driver.
//!
//! A [`Session`] owns everything derived from one source file: the parse,
//! the resolution, and the inference. Phase methods are lazy and memoized;
//! a phase that reported errors renders them once and withholds its
//! result, which keeps later phases from running (they see `None`).

use std::io::Write;

use mppl_common::source::Source;
use mppl_parser::Parse;
use mppl_report::{Emitter, Report};
use mppl_resolver::Resolution;
use mppl_typeck::Inference;

pub struct Session {
    source: Source,
    emitter: Emitter,
    parse: Option<Parse>,
    parse_failed: bool,
    resolution: Option<Resolution>,
    resolve_failed: bool,
    inference: Option<Inference>,
    check_failed: bool,
}

impl Session {
    pub fn new(source: Source, emitter: Emitter) -> Self {
        Self {
            source,
            emitter,
            parse: None,
            parse_failed: false,
            resolution: None,
            resolve_failed: false,
            inference: None,
            check_failed: false,
        }
    }

    /// Lex and parse. Returns `None` after reporting errors.
    pub fn parse(&mut self) -> Option<&Parse> {
        if self.parse.is_none() && !self.parse_failed {
            let parse = mppl_parser::parse(self.source.text());
            if parse.ok() {
                self.parse = Some(parse);
            } else {
                self.render(parse.errors());
                self.parse_failed = true;
            }
        }
        self.parse.as_ref()
    }

    /// Resolve names. Runs the parse first; returns `None` if either phase
    /// reported errors.
    pub fn resolve(&mut self) -> Option<&Resolution> {
        if self.resolution.is_none() && !self.resolve_failed {
            self.parse()?;
            let result = mppl_resolver::resolve(self.parse.as_ref().expect("parsed above"));
            if result.ok() {
                self.resolution = Some(result.resolution);
            } else {
                self.render(&result.errors);
                self.resolve_failed = true;
            }
        }
        self.resolution.as_ref()
    }

    /// Type-check. Runs the earlier phases first; returns `None` if any
    /// phase reported errors.
    pub fn check(&mut self) -> Option<&Inference> {
        if self.inference.is_none() && !self.check_failed {
            self.resolve()?;
            let parse = self.parse.as_ref().expect("parsed above");
            let resolution = self.resolution.as_ref().expect("resolved above");
            let result = mppl_typeck::check(parse, resolution);
            if result.ok() {
                self.inference = Some(result.inference);
            } else {
                self.render(&result.errors);
                self.check_failed = true;
            }
        }
        self.inference.as_ref()
    }

    /// Render a phase's reports to stderr, in order of encounter.
    fn render(&self, reports: &[Report]) {
        let stderr = std::io::stderr();
        let mut handle = stderr.lock();
        for report in reports {
            if self.emitter.emit(report, &self.source, &mut handle).is_err() {
                return;
            }
        }
        let _ = handle.flush();
    }
}
