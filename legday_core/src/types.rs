//! Core domain types for the leg-day training system.
//!
//! This module defines the fundamental types used throughout the system:
//! - Exercises and the catalog record shape
//! - Speed and difficulty settings for the interval timer
//! - The advice exchange tracked by the trainer chat

use serde::{Deserialize, Serialize};

// ============================================================================
// Exercise Types
// ============================================================================

/// A leg-training exercise (e.g., "Bodyweight Squat")
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Exercise {
    pub id: u32,
    pub title: String,
    pub note: String,
    pub reference_url: String,
}

// ============================================================================
// Timer Setting Types
// ============================================================================

/// Countdown pace for a single rep
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Speed {
    Slow,
    Fast,
}

impl Speed {
    /// Seconds counted down for one rep at this pace
    pub fn countdown_seconds(self) -> u32 {
        match self {
            Speed::Slow => 30,
            Speed::Fast => 10,
        }
    }
}

/// Workout volume setting
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Hard,
}

impl Difficulty {
    /// Reps that make up one set at this difficulty
    pub fn reps_per_set(self) -> u32 {
        match self {
            Difficulty::Easy => 5,
            Difficulty::Hard => 20,
        }
    }

    /// Total sets in a full workout
    pub fn total_sets(self) -> u32 {
        match self {
            Difficulty::Easy => 3,
            Difficulty::Hard => 3,
        }
    }
}

// ============================================================================
// Advice Types
// ============================================================================

/// One question/answer round with the remote trainer
///
/// The response text is overwritten by each new call; no history is kept.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct AdviceExchange {
    pub prompt_text: String,
    pub response_text: String,
    pub pending: bool,
}
