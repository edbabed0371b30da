//! Noyau numérique
//!
//! Organisation interne :
//! - erreur.rs   : ErreurCalcul (une variante par refus) + Resultat<T>
//! - format.rs   : format_nombre (12 chiffres) / format_resultat (14 chiffres)
//! - lecture.rs  : texte saisi -> nombres, matrices, vecteurs, données
//! - jetons.rs   : normalisation des glyphes + tokenisation + factorielles
//! - rpn.rs      : shunting-yard + construction Expr
//! - expr.rs     : AST f64 + ModeAngle + factorielle
//! - eval.rs     : pipeline complet d’une expression
//! - matrice.rs  : déterminant, inverse, transposée, +, -, ×
//! - vecteur.rs  : norme, unitaire, produits, angle, projection
//! - complexe.rs : arithmétique Complex64 + forme polaire
//! - stats.rs    : statistiques descriptives
//!
//! Aucun état global : chaque opération est une fonction pure de ses entrées.

pub mod complexe;
pub mod erreur;
pub mod eval;
pub mod expr;
pub mod format;
pub mod jetons;
pub mod lecture;
pub mod matrice;
pub mod rpn;
pub mod stats;
pub mod vecteur;

#[cfg(test)]
mod tests_proprietes;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique
pub use erreur::{ErreurCalcul, Resultat};
pub use eval::{evaluer, evaluer_avec_reponse, evaluer_detaille, Demarche, Evaluation};
pub use expr::ModeAngle;
pub use format::{format_nombre, format_resultat};
