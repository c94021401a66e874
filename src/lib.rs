#![forbid(unsafe_code)]

//! # readiness-harness
//!
//! An AI cost readiness assessment: a ten-dimension scored questionnaire
//! whose answers are turned into a prompt for an LLM, which returns a
//! structured readiness report (summary, strengths, gaps, roadmap) rendered
//! alongside an overall percentage and a per-dimension radar series.
//!
//! The pipeline is strictly sequential: the assessment flow collects one
//! score per dimension, the prompt builder renders the provider-agnostic
//! request, a single report client call is awaited, and the controller
//! either shows the full report or returns the user to the landing state.

pub mod catalog;
pub mod client;
pub mod controller;
pub mod flow;
pub mod model;
pub mod prompts;
pub mod relay;
pub mod report;
pub mod score;

pub use catalog::{Category, Dimension, ScoreOption, DIMENSIONS, DIMENSION_COUNT, OPTIONS};
pub use client::{
    OpenRouterReportClient, PlaceholderReportClient, RelayReportClient, ReportClient, ReportError,
};
pub use controller::{AppController, AppState, AssessmentOutcome, ControllerError};
pub use flow::{AssessmentFlow, FlowError, FlowState, SelectOutcome};
pub use model::Response;
pub use report::{placeholder_report, Report, RoadmapItem};
pub use score::{chart_series, scorecard, ChartPoint, Scorecard};
