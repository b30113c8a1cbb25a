#![forbid(unsafe_code)]

//! Pipeline executor.
//!
//! An [`XmlNormalizer`] holds a compiled stage sequence and runs documents
//! through it. Every call builds its own transform instances, so one
//! normalizer can serve any number of threads.

use crate::compiler::{Baseline, CompiledPipeline, StageCompiler};
use std::fmt;
use std::io::{Read, Write};
use std::path::Path;
use std::sync::Arc;
use xmlnorm_core::{Configuration, Error, StageDescriptor};
use xmlnorm_transforms::{StandardEngine, TransformData, TransformEngine};
use xmlnorm_xml::XmlDocument;

/// Carriage-return references the renderer may leave behind.
const CR_ARTIFACTS: [&str; 2] = ["&#xD;", "&#13;"];

pub struct XmlNormalizer {
    pipeline: CompiledPipeline,
    engine: Arc<dyn TransformEngine>,
}

impl fmt::Debug for XmlNormalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XmlNormalizer")
            .field("pipeline", &self.pipeline)
            .finish_non_exhaustive()
    }
}

impl XmlNormalizer {
    /// Compile `config` with the standard baseline and engine.
    pub fn new(config: &Configuration) -> Result<Self, Error> {
        Self::with_baseline(config, &Baseline::standard())
    }

    pub fn with_baseline(config: &Configuration, baseline: &Baseline) -> Result<Self, Error> {
        Self::with_engine(config, baseline, Arc::new(StandardEngine))
    }

    pub fn with_engine(
        config: &Configuration,
        baseline: &Baseline,
        engine: Arc<dyn TransformEngine>,
    ) -> Result<Self, Error> {
        let pipeline = StageCompiler::new(baseline, engine.as_ref()).compile(config)?;
        Ok(Self { pipeline, engine })
    }

    /// Wrap an already compiled pipeline. The stages are not re-validated.
    pub fn from_compiled(pipeline: CompiledPipeline, engine: Arc<dyn TransformEngine>) -> Self {
        Self { pipeline, engine }
    }

    pub fn pipeline(&self) -> &CompiledPipeline {
        &self.pipeline
    }

    pub fn stages(&self) -> &[StageDescriptor] {
        self.pipeline.stages()
    }

    fn run(&self, input: TransformData) -> Result<String, Error> {
        let transforms = self.engine.pipeline(self.pipeline.stages())?;
        tracing::debug!(stages = transforms.len(), "normalizing document");
        let output = transforms.execute(input)?;
        Ok(output.into_text())
    }

    /// Normalize a parsed document.
    pub fn normalize_document(&self, doc: XmlDocument) -> Result<String, Error> {
        self.run(TransformData::Tree(doc))
    }

    /// Normalize XML text and return the canonical text.
    ///
    /// Carriage-return character references are removed from the result;
    /// line terminators are not significant for comparison.
    pub fn normalize_str(&self, xml: &str) -> Result<String, Error> {
        let mut output = self.run(TransformData::Text(xml.to_owned()))?;
        for artifact in CR_ARTIFACTS {
            if output.contains(artifact) {
                output = output.replace(artifact, "");
            }
        }
        Ok(output)
    }

    /// Read a document from `source` and write the canonical form to `sink`.
    ///
    /// Nothing is written unless every stage succeeded.
    pub fn normalize_reader<R: Read, W: Write>(&self, mut source: R, mut sink: W) -> Result<(), Error> {
        let mut xml = String::new();
        source.read_to_string(&mut xml)?;
        let output = self.run(TransformData::Text(xml))?;
        sink.write_all(output.as_bytes())?;
        sink.flush()?;
        Ok(())
    }

    /// Normalize the file at `source` into `target`.
    ///
    /// `target` is only created once the whole pipeline has succeeded.
    pub fn normalize_file(&self, source: &Path, target: &Path) -> Result<(), Error> {
        let xml = std::fs::read_to_string(source).map_err(|e| Error::File {
            path: source.to_path_buf(),
            source: e,
        })?;
        let output = self.run(TransformData::Text(xml))?;
        std::fs::write(target, output).map_err(|e| Error::File {
            path: target.to_path_buf(),
            source: e,
        })
    }
}
