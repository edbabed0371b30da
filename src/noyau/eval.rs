//! Noyau : évaluation d’expressions (pipeline réel)
//!
//! normaliser -> jetons -> factorielles (x! => fact(x)) -> RPN -> Expr -> valeur -> affichage
//!
//! Le mode DEG/RAD et la dernière réponse sont des PARAMÈTRES : l’appelant les
//! possède et les met à jour, le noyau ne fait que les lire.

use log::{debug, warn};

use super::erreur::{ErreurCalcul, Resultat};
use super::expr::ModeAngle;
use super::format::format_resultat;
use super::jetons::{desucrer_factorielles, format_tokens, normaliser, tokenize};
use super::rpn::{from_rpn, to_rpn};

#[derive(Default, Clone, Debug, PartialEq)]
pub struct Demarche {
    pub normalisee: String,
    pub jetons: String,
    pub rpn: String,
    pub arbre: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    /// Valeur pleine précision (toujours finie).
    pub valeur: f64,
    /// Texte affiché (14 chiffres significatifs ou scientifique).
    pub affichage: String,
    pub demarche: Demarche,
}

impl Evaluation {
    /// Valeur à conserver comme "ans" : celle qui est affichée.
    pub fn reponse(&self) -> f64 {
        self.affichage.parse().unwrap_or(self.valeur)
    }
}

/// API publique : évalue une expression dans le mode donné.
pub fn evaluer(expr: &str, mode: ModeAngle) -> Resultat<f64> {
    evaluer_detaille(expr, mode, None).map(|e| e.valeur)
}

/// Comme `evaluer`, avec l’identifiant `ans` lié à la dernière réponse.
pub fn evaluer_avec_reponse(expr: &str, mode: ModeAngle, ans: f64) -> Resultat<f64> {
    evaluer_detaille(expr, mode, Some(ans)).map(|e| e.valeur)
}

/// Pipeline complet : valeur + affichage + démarche.
pub fn evaluer_detaille(
    expr_str: &str,
    mode: ModeAngle,
    ans: Option<f64>,
) -> Resultat<Evaluation> {
    let r = pipeline(expr_str, mode, ans);
    if let Err(e) = &r {
        warn!("évaluation refusée ({expr_str:?}) : {e}");
    }
    r
}

fn pipeline(expr_str: &str, mode: ModeAngle, ans: Option<f64>) -> Resultat<Evaluation> {
    // 1) Normalisation des glyphes
    let s = normaliser(expr_str);
    if s.is_empty() {
        return Err(ErreurCalcul::syntaxe("entrée vide"));
    }

    // 2) Jetons (constantes + table de fonctions résolues ici)
    let jetons = tokenize(&s, ans)?;

    // 3) Factorielles postfixes => appels fact(...)
    let jetons = desucrer_factorielles(jetons)?;
    let jetons_txt = format_tokens(&jetons);

    // 4) RPN puis arbre
    let rpn = to_rpn(&jetons)?;
    let rpn_txt = format_tokens(&rpn);
    let arbre = from_rpn(&rpn)?;

    debug!("[{mode}] {s:?} | jetons: {jetons_txt} | rpn: {rpn_txt}");

    // 5) Valeur
    let valeur = arbre.evaluer(mode)?;
    if !valeur.is_finite() {
        return Err(ErreurCalcul::ResultatInvalide);
    }

    Ok(Evaluation {
        valeur,
        affichage: format_resultat(valeur),
        demarche: Demarche {
            normalisee: s,
            jetons: jetons_txt,
            rpn: rpn_txt,
            arbre: arbre.to_string(),
        },
    })
}
