// src/app.rs
//
// Module App (racine)
// -------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs)
// - Ré-exporter AppCalc (pour main.rs: use calculatrice_numerique::app::AppCalc;)
//
// Le noyau ne garde aucun état : le mode DEG/RAD, la dernière réponse et
// l’historique vivent ici, côté appelant.

pub mod etat;
pub mod vue;

pub use etat::{AppCalc, EntreeHistorique};
