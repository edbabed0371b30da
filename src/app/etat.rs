//! src/app/etat.rs
//!
//! État de la calculatrice (sans affichage).
//!
//! Rôle : posséder ce que le noyau refuse de posséder (entrée, mode DEG/RAD,
//! dernière réponse, historique) et offrir les actions de la calculatrice
//! (=, DEG/RAD, Ans, C, DEL, rappel d’historique).
//!
//! Contrats :
//! - Toute évaluation passe par `noyau::evaluer_detaille` (jamais d’exécution de texte).
//! - Une erreur ne touche PAS à l’entrée : l’utilisateur corrige et relance.
//! - Historique borné, en mémoire seulement.

use log::debug;

use crate::noyau::{evaluer_detaille, format_resultat, Demarche, ModeAngle, Resultat};

/// Nombre d’entrées conservées dans l’historique.
pub const HISTORIQUE_MAX: usize = 10;

/// Motifs retirés d’un seul coup par DEL.
const MOTIFS_RETOUR: [&str; 9] = [
    "sqrt(", "sin(", "cos(", "tan(", "log(", "exp(", "ln(", "ans", "pi",
];

#[derive(Clone, Debug, PartialEq)]
pub struct EntreeHistorique {
    pub expression: String,
    pub resultat: String,
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,
    /// Expression évaluée en dernier (ligne "précédente" de l’écran).
    pub precedent: String,

    // --- paramètres ---
    pub mode: ModeAngle,
    pub derniere_reponse: f64,

    // --- sorties ---
    pub erreur: String,
    pub demarche: Demarche,

    // plus ancienne en tête
    historique: Vec<EntreeHistorique>,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            entree: String::new(),
            precedent: String::new(),
            mode: ModeAngle::Degres,
            derniere_reponse: 0.0,
            erreur: String::new(),
            demarche: Demarche::default(),
            historique: Vec::new(),
        }
    }
}

impl AppCalc {
    pub fn new(mode: ModeAngle, derniere_reponse: f64) -> Self {
        Self {
            mode,
            derniere_reponse,
            ..Self::default()
        }
    }

    /* ------------------------ "=" ------------------------ */

    /// Évalue l’entrée courante.
    ///
    /// Succès : précédent ← entrée, entrée ← résultat affiché, ans ← résultat,
    /// ajout à l’historique. Échec : message d’erreur, entrée inchangée.
    /// Entrée vide : rien ne se passe (Ok(None)).
    pub fn evaluer(&mut self) -> Resultat<Option<String>> {
        if self.entree.trim().is_empty() {
            return Ok(None);
        }

        match evaluer_detaille(&self.entree, self.mode, Some(self.derniere_reponse)) {
            Ok(ev) => {
                debug!("[{}] {} = {}", self.mode, self.entree, ev.affichage);

                self.precedent = std::mem::take(&mut self.entree);
                self.entree = ev.affichage.clone();
                self.derniere_reponse = ev.reponse();
                self.erreur.clear();
                self.demarche = ev.demarche;

                self.historique.push(EntreeHistorique {
                    expression: self.precedent.clone(),
                    resultat: ev.affichage.clone(),
                });
                if self.historique.len() > HISTORIQUE_MAX {
                    self.historique.remove(0);
                }

                Ok(Some(ev.affichage))
            }
            Err(e) => {
                self.erreur = e.to_string();
                self.demarche = Demarche::default();
                Err(e)
            }
        }
    }

    /* ------------------------ Touches ------------------------ */

    /// DEG <-> RAD ; rend le nouveau mode.
    pub fn basculer_mode(&mut self) -> ModeAngle {
        self.mode = self.mode.bascule();
        self.mode
    }

    /// Ajoute du texte à l’entrée (touche du pavé).
    pub fn inserer(&mut self, texte: &str) {
        self.entree.push_str(texte);
        self.erreur.clear();
    }

    /// Touche Ans : ajoute la dernière réponse, telle qu’affichée.
    pub fn inserer_reponse(&mut self) {
        let txt = format_resultat(self.derniere_reponse);
        self.inserer(&txt);
    }

    /// C : efface l’entrée, la ligne précédente et l’erreur (ans et mode conservés).
    pub fn effacer(&mut self) {
        self.entree.clear();
        self.precedent.clear();
        self.erreur.clear();
    }

    /// DEL : retire le dernier symbole ; un nom de fonction part d’un coup ("sin(").
    pub fn retour_arriere(&mut self) {
        while self.entree.ends_with(' ') {
            self.entree.pop();
        }

        match MOTIFS_RETOUR.iter().find(|m| self.entree.ends_with(*m)) {
            Some(m) => {
                let n = self.entree.len() - m.len();
                self.entree.truncate(n);
            }
            None => {
                self.entree.pop();
            }
        }

        while self.entree.ends_with(' ') {
            self.entree.pop();
        }
    }

    /* ------------------------ Historique ------------------------ */

    /// Historique, plus ancienne entrée en tête.
    pub fn historique(&self) -> &[EntreeHistorique] {
        &self.historique
    }

    /// Recopie l’expression n° `i` (0 = la plus récente) dans l’entrée.
    pub fn rappeler(&mut self, i: usize) -> bool {
        let n = self.historique.len();
        if i >= n {
            return false;
        }
        self.entree = self.historique[n - 1 - i].expression.clone();
        self.erreur.clear();
        true
    }

    pub fn effacer_historique(&mut self) {
        self.historique.clear();
    }
}
