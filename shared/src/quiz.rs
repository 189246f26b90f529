//! Taste quiz classification.
//!
//! Every answer awards points to one or more archetypes according to the
//! scoring matrix. The archetype with the highest total wins; ties are broken
//! by an injected [`TieBreaker`].

use std::collections::HashMap;

use rand::Rng;
use thiserror::Error;

use crate::defaults::{standard_profiles, standard_questions};
use crate::models::{QuizProfile, QuizQuestion};

/// Rejected quiz submissions
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QuizError {
    #[error("Expected {expected} answers, got {actual}")]
    WrongAnswerCount { expected: usize, actual: usize },

    #[error("Answer {answer} is out of range for question {question} ({options} options)")]
    AnswerOutOfRange {
        question: usize,
        answer: i64,
        options: usize,
    },
}

/// Problems with a custom profile table or scoring matrix
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Profile table is empty")]
    NoProfiles,

    #[error("Duplicate profile id: {0}")]
    DuplicateProfile(String),

    #[error("Question {question} awards points to unknown profile {profile_id}")]
    UnknownProfile { question: usize, profile_id: String },

    #[error("Question {question} awards {points} points (must be 1-3)")]
    InvalidPoints { question: usize, points: u8 },

    #[error("Question {0} has no answer choices")]
    NoChoices(usize),

    #[error("Question {question} offers {offered} answers but its row has {choices}")]
    InvalidOptionCount {
        question: usize,
        offered: usize,
        choices: usize,
    },
}

/// Picks one of several tied candidates
pub trait TieBreaker {
    /// Return an index in `0..tied`
    fn choose(&mut self, tied: usize) -> usize;
}

impl<T: TieBreaker + ?Sized> TieBreaker for &mut T {
    fn choose(&mut self, tied: usize) -> usize {
        (**self).choose(tied)
    }
}

/// Uniformly random tie-breaking
#[derive(Debug, Clone)]
pub struct RandomTieBreaker<R>(pub R);

impl<R: Rng> TieBreaker for RandomTieBreaker<R> {
    fn choose(&mut self, tied: usize) -> usize {
        self.0.gen_range(0..tied)
    }
}

/// Always takes the candidate at a fixed position (clamped), in table order
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedTieBreaker(pub usize);

impl TieBreaker for FixedTieBreaker {
    fn choose(&mut self, tied: usize) -> usize {
        self.0.min(tied.saturating_sub(1))
    }
}

/// Profile table and scoring matrix, validated once
#[derive(Debug, Clone)]
pub struct QuizCatalog {
    profiles: Vec<QuizProfile>,
    questions: Vec<QuizQuestion>,
    /// Award targets resolved to profile indexes, per question per choice
    resolved: Vec<Vec<Vec<(usize, u32)>>>,
}

impl QuizCatalog {
    /// Build a catalog, checking that every award references a known profile
    pub fn new(
        profiles: Vec<QuizProfile>,
        questions: Vec<QuizQuestion>,
    ) -> Result<Self, CatalogError> {
        if profiles.is_empty() {
            return Err(CatalogError::NoProfiles);
        }

        let mut index = HashMap::with_capacity(profiles.len());
        for (i, profile) in profiles.iter().enumerate() {
            if index.insert(profile.id.as_str(), i).is_some() {
                return Err(CatalogError::DuplicateProfile(profile.id.clone()));
            }
        }

        let mut resolved = Vec::with_capacity(questions.len());
        for question in &questions {
            if question.choices.is_empty() {
                return Err(CatalogError::NoChoices(question.number));
            }
            if question.offered == 0 || question.offered > question.choices.len() {
                return Err(CatalogError::InvalidOptionCount {
                    question: question.number,
                    offered: question.offered,
                    choices: question.choices.len(),
                });
            }
            let mut row = Vec::with_capacity(question.choices.len());
            for awards in &question.choices {
                let mut cell = Vec::with_capacity(awards.len());
                for award in awards {
                    if !(1..=3).contains(&award.points) {
                        return Err(CatalogError::InvalidPoints {
                            question: question.number,
                            points: award.points,
                        });
                    }
                    let target = index.get(award.profile_id.as_str()).ok_or_else(|| {
                        CatalogError::UnknownProfile {
                            question: question.number,
                            profile_id: award.profile_id.clone(),
                        }
                    })?;
                    cell.push((*target, award.points as u32));
                }
                row.push(cell);
            }
            resolved.push(row);
        }
        drop(index);

        Ok(Self {
            profiles,
            questions,
            resolved,
        })
    }

    /// The built-in ten archetypes and fifteen-question matrix
    pub fn standard() -> Result<Self, CatalogError> {
        Self::new(standard_profiles(), standard_questions())
    }

    pub fn profiles(&self) -> &[QuizProfile] {
        &self.profiles
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn profile(&self, id: &str) -> Option<&QuizProfile> {
        self.profiles.iter().find(|p| p.id == id)
    }
}

/// Accumulated points for one profile
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileTally<'a> {
    pub profile: &'a QuizProfile,
    pub points: u32,
}

/// Resolves quiz answers to a taste archetype
#[derive(Debug, Clone, Copy)]
pub struct QuizClassifier<'a> {
    catalog: &'a QuizCatalog,
}

impl<'a> QuizClassifier<'a> {
    pub fn new(catalog: &'a QuizCatalog) -> Self {
        Self { catalog }
    }

    /// Points per profile, in table order
    pub fn tally(&self, answers: &[i64]) -> Result<Vec<ProfileTally<'a>>, QuizError> {
        let choices = self.validate(answers)?;

        let mut points = vec![0u32; self.catalog.profiles.len()];
        for (row, choice) in self.catalog.resolved.iter().zip(choices) {
            for &(profile, awarded) in &row[choice] {
                points[profile] += awarded;
            }
        }

        Ok(self
            .catalog
            .profiles
            .iter()
            .zip(points)
            .map(|(profile, points)| ProfileTally { profile, points })
            .collect())
    }

    /// Winning profile. Profiles tied on the top score are handed to the
    /// tie breaker in table order.
    pub fn classify<T: TieBreaker>(
        &self,
        answers: &[i64],
        tie_breaker: &mut T,
    ) -> Result<QuizProfile, QuizError> {
        let tally = self.tally(answers)?;
        let top = tally.iter().map(|t| t.points).max().unwrap_or(0);
        let tied: Vec<&QuizProfile> = tally
            .iter()
            .filter(|t| t.points == top)
            .map(|t| t.profile)
            .collect();

        let pick = if tied.len() > 1 {
            tie_breaker.choose(tied.len()).min(tied.len() - 1)
        } else {
            0
        };
        Ok(tied[pick].clone())
    }

    fn validate(&self, answers: &[i64]) -> Result<Vec<usize>, QuizError> {
        let expected = self.catalog.questions.len();
        if answers.len() != expected {
            return Err(QuizError::WrongAnswerCount {
                expected,
                actual: answers.len(),
            });
        }

        answers
            .iter()
            .zip(&self.catalog.questions)
            .map(|(&answer, question)| {
                usize::try_from(answer)
                    .ok()
                    .filter(|&choice| choice < question.option_count())
                    .ok_or(QuizError::AnswerOutOfRange {
                        question: question.number,
                        answer,
                        options: question.option_count(),
                    })
            })
            .collect()
    }
}
