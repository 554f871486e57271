//! # Collector de Métricas
//! src/metrics/collector.rs
//!
//! Recolecta y agrega métricas del servidor en tiempo real. Los workers
//! reportan aquí cada chunk transferido y el resultado de cada request;
//! el collector agrega y expone snapshots, nunca escribe a la consola.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Collector de métricas thread-safe
#[derive(Clone)]
pub struct MetricsCollector {
    inner: Arc<Mutex<MetricsData>>,
    start_time: Instant,
}

/// Datos internos de métricas
struct MetricsData {
    /// Contador total de requests atendidos
    total_requests: u64,

    /// Requests por resultado (OK, FILE_NOT_FOUND, ERROR, ABORTED, REJECTED)
    outcomes: HashMap<&'static str, u64>,

    /// Total de bytes de payload transmitidos
    payload_bytes: u64,

    /// Total de chunks transmitidos
    chunks_sent: u64,

    /// Requests rechazados por la cola llena
    queue_rejections: u64,

    /// Workers actualmente procesando un request
    busy_workers: u64,

    /// Latencias registradas (en microsegundos)
    latencies: Vec<u64>,

    /// Máximo de latencias a guardar (para calcular percentiles)
    max_latencies: usize,
}

impl MetricsCollector {
    /// Crea un nuevo collector de métricas
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MetricsData {
                total_requests: 0,
                outcomes: HashMap::new(),
                payload_bytes: 0,
                chunks_sent: 0,
                queue_rejections: 0,
                busy_workers: 0,
                latencies: Vec::with_capacity(10000),
                max_latencies: 10000, // Guardar últimas 10k latencias
            })),
            start_time: Instant::now(),
        }
    }

    /// Registra el resultado de un request atendido por un worker
    pub fn record_request(&self, outcome: &'static str, latency: Duration) {
        let mut data = self.inner.lock().unwrap();

        data.total_requests += 1;
        *data.outcomes.entry(outcome).or_insert(0) += 1;

        let latency_us = latency.as_micros() as u64;

        // Si tenemos demasiadas latencias, eliminar las más antiguas
        if data.latencies.len() >= data.max_latencies {
            data.latencies.remove(0);
        }
        data.latencies.push(latency_us);
    }

    /// Registra un chunk transmitido (hook de observabilidad por chunk)
    pub fn record_chunk(&self, bytes_written: usize) {
        let mut data = self.inner.lock().unwrap();
        data.chunks_sent += 1;
        data.payload_bytes += bytes_written as u64;
    }

    /// Registra un request rechazado por la cola llena
    pub fn record_rejection(&self) {
        let mut data = self.inner.lock().unwrap();
        data.queue_rejections += 1;
        data.total_requests += 1;
        *data.outcomes.entry("REJECTED").or_insert(0) += 1;
    }

    /// Marca que un worker empezó a procesar un request
    pub fn worker_busy(&self) {
        let mut data = self.inner.lock().unwrap();
        data.busy_workers += 1;
    }

    /// Marca que un worker terminó de procesar un request
    pub fn worker_idle(&self) {
        let mut data = self.inner.lock().unwrap();
        if data.busy_workers > 0 {
            data.busy_workers -= 1;
        }
    }

    /// Obtiene el número de workers ocupados
    pub fn busy_workers(&self) -> u64 {
        let data = self.inner.lock().unwrap();
        data.busy_workers
    }

    /// Obtiene un snapshot de las métricas
    pub fn snapshot(&self) -> MetricsSnapshot {
        let data = self.inner.lock().unwrap();
        let (p50, p95, p99, avg) = Self::calculate_percentiles(&data.latencies);

        let outcomes = data
            .outcomes
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect();

        MetricsSnapshot {
            total_requests: data.total_requests,
            outcomes,
            payload_bytes: data.payload_bytes,
            chunks_sent: data.chunks_sent,
            queue_rejections: data.queue_rejections,
            busy_workers: data.busy_workers,
            uptime_secs: self.start_time.elapsed().as_secs(),
            latency_p50_us: p50,
            latency_p95_us: p95,
            latency_p99_us: p99,
            latency_avg_us: avg,
        }
    }

    /// Obtiene las métricas actuales en formato JSON
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self.snapshot())
            .unwrap_or_else(|_| "{}".to_string())
    }

    /// Calcula percentiles de latencia
    fn calculate_percentiles(latencies: &[u64]) -> (u64, u64, u64, u64) {
        if latencies.is_empty() {
            return (0, 0, 0, 0);
        }

        let mut sorted = latencies.to_vec();
        sorted.sort_unstable();

        let len = sorted.len();
        let p50 = sorted[len * 50 / 100];
        let p95 = sorted[(len * 95 / 100).min(len - 1)];
        let p99 = sorted[(len * 99 / 100).min(len - 1)];

        let sum: u64 = sorted.iter().sum();
        let avg = sum / len as u64;

        (p50, p95, p99, avg)
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot de métricas (para uso externo)
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub total_requests: u64,
    pub outcomes: HashMap<String, u64>,
    pub payload_bytes: u64,
    pub chunks_sent: u64,
    pub queue_rejections: u64,
    pub busy_workers: u64,
    pub uptime_secs: u64,
    pub latency_p50_us: u64,
    pub latency_p95_us: u64,
    pub latency_p99_us: u64,
    pub latency_avg_us: u64,
}
