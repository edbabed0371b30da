// src/lib.rs
//
// Calculatrice numérique : noyau de calcul + état d’orchestration.
// Le binaire `calc` (main.rs) n’est qu’un client de cette bibliothèque.

pub mod app;
pub mod noyau;
