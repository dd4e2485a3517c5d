use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::layout::PitchLayout;
use crate::pitch::PitchSymbol;

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Raw text typed into the pattern field
    PatternInput(String),
    ParticleChanged(PitchSymbol),
    SearchText(String),
    SelectResult(usize),
    DismissResults,
    Export(ExportTarget),
    DictionaryReady {
        entries: usize,
    },
    DictionaryUnavailable(String),
    ShowDiagram(DiagramView),
    ShowResults(Vec<SearchHit>),
    HideResults,
    ExportFinished {
        target: ExportTarget,
        detail: String,
    },
    ExportFailed {
        target: ExportTarget,
        error: String,
    },
    StatusUpdate(String),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportTarget {
    File(PathBuf),
    Clipboard,
}

/// Rendered diagram handed to the UI
#[derive(Debug, Clone)]
pub struct DiagramView {
    /// Normalized pattern, written back into the input field
    pub pattern: String,
    pub particle: PitchSymbol,
    pub layout: PitchLayout,
    pub svg: String,
    /// Word and accent label when the diagram came from a dictionary pick
    pub label: Option<String>,
}

/// One dictionary match: a word and its accent types, primary first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub word: String,
    pub accents: Vec<u32>,
}

impl SearchHit {
    pub fn primary_accent(&self) -> Option<u32> {
        self.accents.first().copied()
    }
}
