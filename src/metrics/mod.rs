//! # Sistema de Métricas
//! src/metrics/mod.rs
//!
//! Observabilidad del servidor. El collector es el hook al que los workers
//! reportan el progreso de cada transferencia, en lugar de imprimir
//! diagnósticos por chunk a stdout desde múltiples threads.

pub mod collector;

pub use collector::{MetricsCollector, MetricsSnapshot};
