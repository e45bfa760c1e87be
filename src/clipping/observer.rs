// src/clipping/observer.rs

use crate::clipping::engine::ClipStats;
use crate::clipping::validate::RejectReason;

/// Stationen eines Clip-Durchlaufs, wie sie der Beobachter zu sehen bekommt.
#[derive(Debug, Clone, PartialEq)]
pub enum ClipEvent<'a> {
    /// Eine Eingabe war leer oder degeneriert; Ergebnis ist leer
    DegenerateInput,
    /// Das analytische Ergebnis hat die Validierung bestanden
    AnalyticAccepted,
    /// Das analytische Ergebnis wurde verworfen; es folgt die Rasterisierung
    AnalyticRejected { reason: RejectReason },
    /// Die Rasterisierung hat eine Kontur geliefert
    FallbackProduced { vertex_count: usize },
    /// Auch die Rasterisierung blieb leer
    FallbackEmpty,
    /// Durchlauf beendet, mit Zusammenfassung
    Finished { stats: &'a ClipStats },
}

/// Injizierte Beobachter-Fähigkeit des Clip-Kerns.
///
/// Der Kern selbst loggt nicht; wer Diagnose will, reicht einen Beobachter
/// in die Engine. Damit bleibt jede Operation eine reine Funktion ihrer
/// Eingaben und in Tests deterministisch prüfbar.
pub trait ClipObserver: Send + Sync {
    fn notify(&self, event: &ClipEvent<'_>);
}

/// Standard-Beobachter: verwirft alle Ereignisse
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl ClipObserver for NullObserver {
    fn notify(&self, _event: &ClipEvent<'_>) {}
}

/// Brücke zu `tracing`: Ereignisse werden als Debug-/Trace-Spans emittiert
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ClipObserver for TracingObserver {
    fn notify(&self, event: &ClipEvent<'_>) {
        match event {
            ClipEvent::DegenerateInput => {
                tracing::debug!("clip: degenerate input, returning empty result");
            }
            ClipEvent::AnalyticAccepted => {
                tracing::trace!("clip: analytic intersection accepted");
            }
            ClipEvent::AnalyticRejected { reason } => {
                tracing::debug!(%reason, "clip: analytic result rejected, rasterizing");
            }
            ClipEvent::FallbackProduced { vertex_count } => {
                tracing::debug!(vertex_count = *vertex_count, "clip: raster fallback produced contour");
            }
            ClipEvent::FallbackEmpty => {
                tracing::debug!("clip: raster fallback found no intersection");
            }
            ClipEvent::Finished { stats } => {
                tracing::trace!(
                    subject_vertices = stats.subject_vertex_count,
                    clip_vertices = stats.clip_vertex_count,
                    result_vertices = stats.result_vertex_count,
                    used_fallback = stats.used_fallback,
                    "clip: finished"
                );
            }
        }
    }
}
