// src/noyau/lecture.rs
//
// Lecture des saisies brutes (cellules, grilles, listes de données).
// Le noyau reçoit du texte : c’est ici qu’il devient f64, ou une erreur typée.

use super::erreur::{ErreurCalcul, Resultat};
use super::matrice::Matrice;
use super::vecteur::Vecteur;

use num_complex::Complex64;

/// Séparateurs de cellules dans une ligne : espaces ou virgules.
fn est_separateur_cellule(c: char) -> bool {
    c.is_whitespace() || c == ','
}

/// Cellule de grille : vide => 0 (comportement des grilles de saisie).
pub fn lire_cellule(s: &str) -> Resultat<f64> {
    let t = s.trim();
    if t.is_empty() {
        return Ok(0.0);
    }
    lire_nombre(t)
}

/// Nombre décimal strict (pas de "NaN", pas de "inf" : saisie humaine).
pub fn lire_nombre(s: &str) -> Resultat<f64> {
    let t = s.trim();
    let ok = !t.is_empty()
        && t
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
        && t.chars().any(|c| c.is_ascii_digit());
    if !ok {
        return Err(ErreurCalcul::EntreeNonNumerique(t.to_string()));
    }
    t.parse::<f64>()
        .map_err(|_| ErreurCalcul::EntreeNonNumerique(t.to_string()))
}

fn lire_ligne(ligne: &str) -> Resultat<Vec<f64>> {
    ligne
        .split(est_separateur_cellule)
        .filter(|c| !c.is_empty())
        .map(lire_nombre)
        .collect()
}

/// Grille texte : lignes séparées par ';' ou retour ligne, cellules par espaces/virgules.
///
/// Exemple : "1 2; 3 4" => [[1,2],[3,4]]
pub fn lire_matrice(s: &str) -> Resultat<Matrice> {
    let mut lignes: Vec<Vec<f64>> = Vec::new();
    for brute in s.split(|c: char| c == ';' || c == '\n') {
        if brute.trim().is_empty() {
            continue;
        }
        lignes.push(lire_ligne(brute)?);
    }
    if lignes.is_empty() {
        return Err(ErreurCalcul::DonneesVides);
    }
    Matrice::new(lignes)
}

pub fn lire_vecteur(s: &str) -> Resultat<Vecteur> {
    let v = lire_ligne(s)?;
    if v.is_empty() {
        return Err(ErreurCalcul::DonneesVides);
    }
    Vecteur::new(v)
}

/// Jeu de données libre : nombres séparés par espaces, virgules ou retours ligne.
pub fn lire_donnees(s: &str) -> Resultat<Vec<f64>> {
    let v = lire_ligne(s)?;
    if v.is_empty() {
        return Err(ErreurCalcul::DonneesVides);
    }
    Ok(v)
}

/// Complexe saisi en deux champs (réel, imaginaire) ; champ vide => 0.
pub fn lire_complexe(re: &str, im: &str) -> Resultat<Complex64> {
    Ok(Complex64::new(lire_cellule(re)?, lire_cellule(im)?))
}
