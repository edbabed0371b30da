// src/main.rs
//
// Calculatrice numérique : point d’entrée ligne de commande (`calc`)
// ------------------------------------------------------------------
// Une sous-commande par moteur + un mode interactif (`repl`) qui garde
// le mode DEG/RAD, la dernière réponse et l’historique d’une ligne à l’autre.
//
// Journalisation : CALC_LOG=debug calc eval "2+3!" (défaut : error).

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use log::LevelFilter;

use calculatrice_numerique::app::vue::{
    rendre_resultat_complexe, rendre_resultat_matrice, rendre_resultat_stat,
    rendre_resultat_vecteur, rendre_resume,
};
use calculatrice_numerique::app::AppCalc;
use calculatrice_numerique::noyau::complexe::{operation_complexe, OpComplexe};
use calculatrice_numerique::noyau::lecture::{
    lire_complexe, lire_donnees, lire_matrice, lire_vecteur,
};
use calculatrice_numerique::noyau::matrice::{operation_matrice, OpMatrice};
use calculatrice_numerique::noyau::stats::{operation_stat, resume, OpStat, TypeVariance};
use calculatrice_numerique::noyau::vecteur::{operation_vecteur, OpVecteur};
use calculatrice_numerique::noyau::{evaluer_detaille, ModeAngle};

const OPS_MATRICE: [&str; 6] = [
    "det",
    "inverse",
    "transposee",
    "addition",
    "soustraction",
    "produit",
];

const OPS_VECTEUR: [&str; 8] = [
    "norme",
    "unitaire",
    "addition",
    "soustraction",
    "scalaire",
    "vectoriel",
    "angle",
    "projection",
];

const OPS_COMPLEXE: [&str; 9] = [
    "conjugue",
    "module",
    "argument",
    "polaire",
    "depuis-polaire",
    "addition",
    "soustraction",
    "produit",
    "quotient",
];

const OPS_STATS: [&str; 11] = [
    "resume",
    "somme",
    "effectif",
    "min",
    "max",
    "moyenne",
    "mediane",
    "mode",
    "etendue",
    "variance",
    "ecart-type",
];

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("CALC_LOG", "error"))
        .init();

    let matches = Command::new("calc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Calculatrice numérique : expressions, matrices, vecteurs, complexes, statistiques")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("eval")
                .about("Évalue une expression (sin, cos, tan, sqrt, log, ln, exp, !, π, e, ans)")
                .arg(
                    Arg::new("expression")
                        .help("Expression, ex. \"2 × (3 + 4)!\"")
                        .required(true)
                        .num_args(1..)
                        .allow_hyphen_values(true)
                        .value_parser(clap::builder::NonEmptyStringValueParser::new()),
                )
                .args(args_mode())
                .arg(arg_ans())
                .arg(
                    Arg::new("demarche")
                        .long("demarche")
                        .help("Affiche jetons, RPN et arbre")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("matrice")
                .about("Opération matricielle (lignes séparées par ';', cellules par espaces ou virgules)")
                .arg(arg_op(&OPS_MATRICE))
                .arg(
                    Arg::new("a")
                        .help("Matrice A, ex. \"1 2; 3 4\"")
                        .required(true)
                        .allow_hyphen_values(true),
                )
                .arg(
                    Arg::new("b")
                        .help("Matrice B (opérations binaires)")
                        .allow_hyphen_values(true),
                ),
        )
        .subcommand(
            Command::new("vecteur")
                .about("Opération vectorielle (composantes séparées par espaces ou virgules)")
                .arg(arg_op(&OPS_VECTEUR))
                .arg(
                    Arg::new("a")
                        .help("Vecteur A, ex. \"1, 2, 3\"")
                        .required(true)
                        .allow_hyphen_values(true),
                )
                .arg(
                    Arg::new("b")
                        .help("Vecteur B (opérations binaires)")
                        .allow_hyphen_values(true),
                ),
        )
        .subcommand(
            Command::new("complexe")
                .about("Opération sur les complexes (\"re im\" ; depuis-polaire lit A comme \"r θ°\")")
                .arg(arg_op(&OPS_COMPLEXE))
                .arg(
                    Arg::new("a")
                        .help("Complexe A, ex. \"3 4\"")
                        .required(true)
                        .allow_hyphen_values(true),
                )
                .arg(
                    Arg::new("b")
                        .help("Complexe B (opérations binaires)")
                        .allow_hyphen_values(true),
                ),
        )
        .subcommand(
            Command::new("stats")
                .about("Statistiques descriptives (valeurs séparées par espaces ou virgules)")
                .arg(arg_op(&OPS_STATS))
                .arg(
                    Arg::new("donnees")
                        .help("Jeu de données, ex. \"1 2 2 5\"")
                        .required(true)
                        .allow_hyphen_values(true),
                )
                .arg(
                    Arg::new("population")
                        .long("population")
                        .help("Variance de population (diviseur n)")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("sample"),
                )
                .arg(
                    Arg::new("sample")
                        .long("sample")
                        .help("Variance d’échantillon (diviseur n-1, défaut)")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("repl")
                .about("Calculatrice interactive (tapez :aide)")
                .args(args_mode())
                .arg(arg_ans()),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("eval", m)) => commande_eval(m),
        Some(("matrice", m)) => commande_matrice(m),
        Some(("vecteur", m)) => commande_vecteur(m),
        Some(("complexe", m)) => commande_complexe(m),
        Some(("stats", m)) => commande_stats(m),
        Some(("repl", m)) => commande_repl(m),
        _ => unreachable!("Subcommand is required by CLI configuration"),
    }
}

/* ------------------------ Arguments communs ------------------------ */

fn args_mode() -> [Arg; 2] {
    [
        Arg::new("rad")
            .long("rad")
            .help("Angles en radians")
            .action(ArgAction::SetTrue)
            .conflicts_with("deg"),
        Arg::new("deg")
            .long("deg")
            .help("Angles en degrés (défaut)")
            .action(ArgAction::SetTrue),
    ]
}

fn arg_ans() -> Arg {
    Arg::new("ans")
        .long("ans")
        .help("Valeur initiale de `ans`")
        .value_parser(clap::value_parser!(f64))
        .allow_negative_numbers(true)
        .default_value("0")
}

fn arg_op(ops: &'static [&'static str]) -> Arg {
    Arg::new("op")
        .help("Opération")
        .required(true)
        .value_parser(clap::builder::PossibleValuesParser::new(ops.iter().copied()))
}

fn mode_depuis(m: &ArgMatches) -> ModeAngle {
    if m.get_flag("rad") {
        ModeAngle::Radians
    } else {
        ModeAngle::Degres
    }
}

fn ans_depuis(m: &ArgMatches) -> f64 {
    m.get_one::<f64>("ans").copied().unwrap_or(0.0)
}

fn op_depuis(m: &ArgMatches) -> &str {
    m.get_one::<String>("op").map(String::as_str).unwrap_or_default()
}

/* ------------------------ Sous-commandes ------------------------ */

fn commande_eval(m: &ArgMatches) -> Result<()> {
    let expression = m
        .get_many::<String>("expression")
        .map(|v| v.cloned().collect::<Vec<_>>().join(" "))
        .unwrap_or_default();

    let ev = evaluer_detaille(&expression, mode_depuis(m), Some(ans_depuis(m)))
        .with_context(|| format!("« {expression} »"))?;

    if m.get_flag("demarche") {
        println!("normalisée : {}", ev.demarche.normalisee);
        println!("jetons     : {}", ev.demarche.jetons);
        println!("rpn        : {}", ev.demarche.rpn);
        println!("arbre      : {}", ev.demarche.arbre);
    }
    println!("{}", ev.affichage);
    Ok(())
}

fn commande_matrice(m: &ArgMatches) -> Result<()> {
    let op = match op_depuis(m) {
        "det" => OpMatrice::Determinant,
        "inverse" => OpMatrice::Inverse,
        "transposee" => OpMatrice::Transposee,
        "addition" => OpMatrice::Addition,
        "soustraction" => OpMatrice::Soustraction,
        "produit" => OpMatrice::Produit,
        autre => bail!("opération matricielle inconnue : {autre}"),
    };

    let a = lire_matrice(texte(m, "a")).context("matrice A")?;
    let b = match m.get_one::<String>("b") {
        Some(t) => Some(lire_matrice(t).context("matrice B")?),
        None => None,
    };

    let r = operation_matrice(op, &a, b.as_ref())?;
    println!("{}", rendre_resultat_matrice(op, &r));
    Ok(())
}

fn commande_vecteur(m: &ArgMatches) -> Result<()> {
    let op = match op_depuis(m) {
        "norme" => OpVecteur::Norme,
        "unitaire" => OpVecteur::Unitaire,
        "addition" => OpVecteur::Addition,
        "soustraction" => OpVecteur::Soustraction,
        "scalaire" => OpVecteur::ProduitScalaire,
        "vectoriel" => OpVecteur::ProduitVectoriel,
        "angle" => OpVecteur::Angle,
        "projection" => OpVecteur::Projection,
        autre => bail!("opération vectorielle inconnue : {autre}"),
    };

    let a = lire_vecteur(texte(m, "a")).context("vecteur A")?;
    let b = match m.get_one::<String>("b") {
        Some(t) => Some(lire_vecteur(t).context("vecteur B")?),
        None => None,
    };

    let r = operation_vecteur(op, &a, b.as_ref())?;
    println!("{}", rendre_resultat_vecteur(op, &r));
    Ok(())
}

fn commande_complexe(m: &ArgMatches) -> Result<()> {
    let op = match op_depuis(m) {
        "conjugue" => OpComplexe::Conjugue,
        "module" => OpComplexe::Module,
        "argument" => OpComplexe::Argument,
        "polaire" => OpComplexe::Polaire,
        "depuis-polaire" => OpComplexe::DepuisPolaire,
        "addition" => OpComplexe::Addition,
        "soustraction" => OpComplexe::Soustraction,
        "produit" => OpComplexe::Produit,
        "quotient" => OpComplexe::Quotient,
        autre => bail!("opération complexe inconnue : {autre}"),
    };

    let a = lire_couple(texte(m, "a")).context("complexe A")?;
    let b = match m.get_one::<String>("b") {
        Some(t) => Some(lire_couple(t).context("complexe B")?),
        None => None,
    };

    let r = operation_complexe(op, a, b)?;
    println!("{}", rendre_resultat_complexe(op, &r));
    Ok(())
}

fn commande_stats(m: &ArgMatches) -> Result<()> {
    let donnees = lire_donnees(texte(m, "donnees")).context("jeu de données")?;
    let t = if m.get_flag("population") {
        TypeVariance::Population
    } else {
        TypeVariance::Echantillon
    };

    let op = match op_depuis(m) {
        "resume" => {
            println!("{}", rendre_resume(&resume(&donnees, t)?));
            return Ok(());
        }
        "somme" => OpStat::Somme,
        "effectif" => OpStat::Effectif,
        "min" => OpStat::Min,
        "max" => OpStat::Max,
        "moyenne" => OpStat::Moyenne,
        "mediane" => OpStat::Mediane,
        "mode" => OpStat::Mode,
        "etendue" => OpStat::Etendue,
        "variance" => OpStat::Variance,
        "ecart-type" => OpStat::EcartType,
        autre => bail!("statistique inconnue : {autre}"),
    };

    let r = operation_stat(op, &donnees, t)?;
    println!("{}", rendre_resultat_stat(&r));
    Ok(())
}

/* ------------------------ REPL ------------------------ */

const AIDE_REPL: &str = "\
expression   évalue (une ligne commençant par un opérateur prolonge le résultat)
:mode        bascule DEG/RAD
:ans         insère la dernière réponse
:del         efface le dernier symbole
:c           efface l’entrée
:hist        historique (10 dernières)
:rappel N    recopie l’entrée N de l’historique
:demarche    jetons / RPN / arbre du dernier calcul
:q           quitter";

fn commande_repl(m: &ArgMatches) -> Result<()> {
    let mut app = AppCalc::new(mode_depuis(m), ans_depuis(m));
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("{}", app.ecran());
    loop {
        print!("> ");
        stdout.flush().context("écriture stdout")?;

        let mut ligne = String::new();
        if stdin.lock().read_line(&mut ligne).context("lecture stdin")? == 0 {
            break;
        }
        let ligne = ligne.trim();

        match ligne {
            "" => {
                // Entrée seule : "=" sur l’entrée courante
                let _ = app.evaluer();
            }
            ":q" | ":quit" => break,
            ":aide" | ":help" => {
                println!("{AIDE_REPL}");
                continue;
            }
            ":mode" => {
                app.basculer_mode();
            }
            ":ans" => app.inserer_reponse(),
            ":del" => app.retour_arriere(),
            ":c" => app.effacer(),
            ":hist" => {
                println!("{}", app.rendre_historique());
                continue;
            }
            ":demarche" => {
                println!("{}", app.rendre_demarche());
                continue;
            }
            _ => {
                if let Some(n) = ligne.strip_prefix(":rappel") {
                    match n.trim().parse::<usize>() {
                        Ok(i) if app.rappeler(i) => {}
                        _ => println!("rappel : numéro invalide"),
                    }
                } else {
                    if !prolonge(ligne) {
                        app.entree.clear();
                    }
                    app.inserer(ligne);
                    let _ = app.evaluer();
                }
            }
        }
        println!("{}", app.ecran());
    }
    Ok(())
}

/// "+2", "*3", "!" … : la ligne continue le résultat affiché.
fn prolonge(ligne: &str) -> bool {
    ligne.starts_with(['+', '*', '/', '^', '%', '!', '×', '÷'])
}

/* ------------------------ Lecture des arguments ------------------------ */

fn texte<'a>(m: &'a ArgMatches, id: &str) -> &'a str {
    m.get_one::<String>(id).map(String::as_str).unwrap_or_default()
}

/// "3 4", "3,4", "3" : partie réelle puis imaginaire (absente = 0).
fn lire_couple(s: &str) -> Result<num_complex::Complex64> {
    let parts: Vec<&str> = s
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|p| !p.is_empty())
        .collect();
    match parts.as_slice() {
        [re] => Ok(lire_complexe(re, "")?),
        [re, im] => Ok(lire_complexe(re, im)?),
        _ => bail!("complexe attendu sous la forme \"re im\" : {s:?}"),
    }
}
