// src/noyau/format.rs
//
// Affichage des nombres (purement présentationnel).
// Tous les calculs internes restent en f64 pleine précision ; seules les
// chaînes produites ici sont arrondies.

use num_traits::Float;

/// Sous ce seuil, une valeur affichée vaut "0" (bruit flottant, -0).
const SEUIL_ZERO: f64 = 1e-12;

/// Bornes de la notation scientifique (affichage moteur).
const SCI_GRAND: f64 = 1e12;
const SCI_PETIT: f64 = 1e-6;

/// Bornes de la notation scientifique (résultat d’expression).
const RES_GRAND: f64 = 1e15;
const RES_PETIT: f64 = 1e-10;

/* ------------------------ Arrondi significatif ------------------------ */

/// Arrondit `x` à `chiffres` chiffres significatifs (≥ 1).
/// Passe par la notation exponentielle de Rust : arrondi décimal exact.
pub fn arrondi_significatif<F: Float + std::fmt::LowerExp + std::str::FromStr>(
    x: F,
    chiffres: usize,
) -> F {
    if !x.is_finite() || x.is_zero() {
        return x;
    }
    let p = chiffres.max(1) - 1;
    format!("{x:.p$e}").parse::<F>().unwrap_or(x)
}

/// Rendu "décimal simple" d’un f64 déjà arrondi (pas d’exposant).
fn decimal_simple(x: f64) -> String {
    // `{}` donne la plus courte représentation exacte, sans exposant.
    let s = format!("{x}");
    if s == "-0" {
        "0".to_string()
    } else {
        s
    }
}

/// Notation scientifique "à la calculatrice" : 1.234567890e+12.
/// `garder_zeros = false` retire les zéros finaux de la mantisse (1.5e+12).
fn scientifique(x: f64, fraction: usize, garder_zeros: bool) -> String {
    let brut = format!("{x:.fraction$e}");
    let (mantisse, exposant) = match brut.split_once('e') {
        Some(parts) => parts,
        None => return brut,
    };

    let mut m = mantisse.to_string();
    if !garder_zeros && m.contains('.') {
        while m.ends_with('0') {
            m.pop();
        }
        if m.ends_with('.') {
            m.pop();
        }
    }

    let exp = match exposant.strip_prefix('-') {
        Some(e) => format!("-{e}"),
        None => format!("+{exposant}"),
    };
    format!("{m}e{exp}")
}

/* ------------------------ NumberFormatter ------------------------ */

/// Affichage d’un nombre produit par un moteur (matrice, vecteur, complexe, stats).
///
/// - NaN : "indéfini" (jamais un infini ; les moteurs le refusent en amont)
/// - infini : "∞" / "-∞"
/// - |x| < 1e-12 : "0"
/// - |x| ≥ 1e12 ou |x| ≤ 1e-6 : scientifique, 9 chiffres après la virgule
/// - sinon : 12 chiffres significatifs, décimal simple
pub fn format_nombre(x: f64) -> String {
    if x.is_nan() {
        return "indéfini".to_string();
    }
    if x.is_infinite() {
        return if x.is_sign_negative() { "-∞" } else { "∞" }.to_string();
    }

    let a = x.abs();
    if a < SEUIL_ZERO {
        return "0".to_string();
    }
    if a >= SCI_GRAND || a <= SCI_PETIT {
        return scientifique(x, 9, false);
    }

    decimal_simple(arrondi_significatif(x, 12))
}

/// Affichage d’un résultat d’expression (étape finale de l’évaluateur).
///
/// Contrat : `v` est fini (l’évaluateur a déjà rejeté NaN / ±∞).
pub fn format_resultat(v: f64) -> String {
    let a = v.abs();
    if a > RES_GRAND || (a > 0.0 && a < RES_PETIT) {
        return scientifique(v, 9, true);
    }
    decimal_simple(arrondi_significatif(v, 14))
}
