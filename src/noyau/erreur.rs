// src/noyau/erreur.rs
//
// Taxonomie des erreurs du noyau.
// Chaque moteur valide ses préconditions AVANT tout calcul et renvoie
// la variante la plus précise. Aucun panic sur entrée utilisateur.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErreurCalcul {
    #[error("dimensions incompatibles: {0}")]
    DimensionsIncompatibles(String),

    #[error("matrice singulière (non inversible)")]
    MatriceSinguliere,

    #[error("vecteur nul: {0}")]
    VecteurNul(String),

    #[error("division par zéro")]
    DivisionParZero,

    #[error("caractère invalide: '{0}'")]
    CaractereInvalide(char),

    #[error("syntaxe invalide: {0}")]
    SyntaxeInvalide(String),

    #[error("factorielle d’un nombre négatif")]
    FactorielleNegative,

    #[error("factorielle trop grande (max 170!)")]
    FactorielleTropGrande,

    #[error("résultat invalide")]
    ResultatInvalide,

    #[error("aucune donnée")]
    DonneesVides,

    #[error("entrée non numérique: {0:?}")]
    EntreeNonNumerique(String),

    #[error("opérande manquant: {0}")]
    OperandeManquant(&'static str),

    #[error("au moins deux valeurs requises pour un échantillon")]
    EchantillonInsuffisant,
}

impl ErreurCalcul {
    pub(crate) fn dimensions(msg: impl Into<String>) -> Self {
        ErreurCalcul::DimensionsIncompatibles(msg.into())
    }

    pub(crate) fn syntaxe(msg: impl Into<String>) -> Self {
        ErreurCalcul::SyntaxeInvalide(msg.into())
    }
}

/// NaN n’est jamais une valeur affichable : toute composante NaN d’un
/// résultat devient `ResultatInvalide`. ±∞ passe (affiché "∞").
pub(crate) fn sans_nan<'a>(valeurs: impl IntoIterator<Item = &'a f64>) -> Resultat<()> {
    if valeurs.into_iter().any(|v| v.is_nan()) {
        return Err(ErreurCalcul::ResultatInvalide);
    }
    Ok(())
}

pub type Resultat<T> = Result<T, ErreurCalcul>;
