// src/app/vue.rs
//
// Vue texte (terminal)
// --------------------
// Transforme les résultats des moteurs en lignes affichables.
// Aucun calcul ici : uniquement format_nombre / format_complexe / format_polaire.
//
// Note :
// - largeur de colonne comptée en caractères (pas en octets) : "∞", "−" …

use std::fmt::Write as _;

use super::etat::AppCalc;
use crate::noyau::complexe::{
    en_degres, format_complexe, format_polaire, OpComplexe, ResultatComplexe,
};
use crate::noyau::format::format_nombre;
use crate::noyau::matrice::{Matrice, OpMatrice};
use crate::noyau::stats::{Resume, ResultatStat};
use crate::noyau::vecteur::{OpVecteur, ResultatVecteur, Vecteur};

/* ------------------------ Matrices ------------------------ */

/// Grille alignée à droite, une ligne de texte par ligne de matrice.
///
///   [ 1  -2 ]
///   [ 3  10 ]
pub fn rendre_matrice(m: &Matrice) -> String {
    let cellules: Vec<Vec<String>> = (0..m.lignes())
        .map(|i| m.ligne(i).iter().map(|v| format_nombre(*v)).collect())
        .collect();

    let mut largeurs = vec![0usize; m.colonnes()];
    for ligne in &cellules {
        for (j, c) in ligne.iter().enumerate() {
            largeurs[j] = largeurs[j].max(c.chars().count());
        }
    }

    let mut out = String::new();
    for (i, ligne) in cellules.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str("[ ");
        for (j, c) in ligne.iter().enumerate() {
            if j > 0 {
                out.push_str("  ");
            }
            let pad = largeurs[j] - c.chars().count();
            out.push_str(&" ".repeat(pad));
            out.push_str(c);
        }
        out.push_str(" ]");
    }
    out
}

/// Le déterminant revient en 1×1 : on l’affiche comme un nombre.
pub fn rendre_resultat_matrice(op: OpMatrice, m: &Matrice) -> String {
    match op {
        OpMatrice::Determinant => format!("det = {}", format_nombre(m.get(0, 0))),
        _ => rendre_matrice(m),
    }
}

/* ------------------------ Vecteurs ------------------------ */

pub fn rendre_vecteur(v: &Vecteur) -> String {
    let txt: Vec<String> = v.composantes().iter().map(|x| format_nombre(*x)).collect();
    format!("[{}]", txt.join(", "))
}

pub fn rendre_resultat_vecteur(op: OpVecteur, r: &ResultatVecteur) -> String {
    match r {
        ResultatVecteur::Vecteur(v) => rendre_vecteur(v),
        ResultatVecteur::Scalaire(x) if op == OpVecteur::Angle => {
            format!("{}°", format_nombre(*x))
        }
        ResultatVecteur::Scalaire(x) => format_nombre(*x),
    }
}

/* ------------------------ Complexes ------------------------ */

pub fn rendre_resultat_complexe(op: OpComplexe, r: &ResultatComplexe) -> String {
    match r {
        ResultatComplexe::Complexe(z) => format_complexe(*z),
        ResultatComplexe::Polaire(p) => format_polaire(*p),
        // l’argument est en radians ; on rappelle sa valeur en degrés
        ResultatComplexe::Scalaire(x) if op == OpComplexe::Argument => {
            format!("{} rad ({})", format_nombre(*x), degres(*x))
        }
        ResultatComplexe::Scalaire(x) => format_nombre(*x),
    }
}

/* ------------------------ Statistiques ------------------------ */

pub fn rendre_resultat_stat(r: &ResultatStat) -> String {
    match r {
        ResultatStat::Nombre(x) => format_nombre(*x),
        ResultatStat::Mode(m) => m.to_string(),
    }
}

/// Tableau "clé : valeur", une statistique par ligne.
pub fn rendre_resume(r: &Resume) -> String {
    let opt = |v: Option<f64>| match v {
        Some(x) => format_nombre(x),
        None => "indisponible (une seule valeur)".to_string(),
    };

    let lignes = [
        ("effectif", r.effectif.to_string()),
        ("somme", format_nombre(r.somme)),
        ("moyenne", format_nombre(r.moyenne)),
        ("médiane", format_nombre(r.mediane)),
        ("mode", r.mode.to_string()),
        ("min", format_nombre(r.min)),
        ("max", format_nombre(r.max)),
        ("étendue", format_nombre(r.etendue)),
        ("variance", opt(r.variance)),
        ("écart-type", opt(r.ecart_type)),
    ];

    let largeur = lignes.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
    let mut out = String::new();
    for (i, (k, v)) in lignes.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let pad = largeur - k.chars().count();
        let _ = write!(out, "{k}{} : {v}", " ".repeat(pad));
    }
    out
}

/* ------------------------ Calculatrice ------------------------ */

impl AppCalc {
    /// Écran : ligne précédente, entrée (ou "0"), erreur éventuelle.
    pub fn ecran(&self) -> String {
        let mut out = String::new();
        if !self.precedent.is_empty() {
            let _ = writeln!(out, "  {} =", self.precedent);
        }
        let entree = if self.entree.is_empty() {
            "0"
        } else {
            self.entree.as_str()
        };
        let _ = write!(out, "[{}] {entree}", self.mode);
        if !self.erreur.is_empty() {
            let _ = write!(out, "\n  erreur : {}", self.erreur);
        }
        out
    }

    /// Historique, plus récent en tête, numéroté pour `rappeler(i)`.
    pub fn rendre_historique(&self) -> String {
        if self.historique().is_empty() {
            return "(historique vide)".to_string();
        }
        let mut out = String::new();
        for (i, h) in self.historique().iter().rev().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            let _ = write!(out, "{i:>2}  {} = {}", h.expression, h.resultat);
        }
        out
    }

    /// Démarche de la dernière évaluation réussie.
    pub fn rendre_demarche(&self) -> String {
        let d = &self.demarche;
        format!(
            "normalisée : {}\njetons     : {}\nrpn        : {}\narbre      : {}",
            d.normalisee, d.jetons, d.rpn, d.arbre
        )
    }
}

/// Angle en degrés, arrondi comme l’affichage polaire.
pub fn degres(theta_rad: f64) -> String {
    format!("{}°", format_nombre(en_degres(theta_rad)))
}
