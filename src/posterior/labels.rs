// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Literature references for every model name, used as plot legends.

const REFERENCES: [(&str, &str); 13] = [
    ("barnes_kilonova_spectra", "Barnes et al. (2016)"),
    ("ns_merger_spectra", "Barnes and Kasen (2013)"),
    ("kilonova_wind_spectra", "Kasen et al. (2014)"),
    ("ns_precursor_Lbol", "Metzger et al. (2015)"),
    ("BHNS", "Kawaguchi et al. (2016)"),
    ("BNS", "Dietrich and Ujevic (2017)"),
    ("SN", "Guy et al. (2007)"),
    ("tanaka_compactmergers", "Tanaka and Hotokezaka (2013)"),
    ("macronovae-rosswog", "Rosswog et al. (2017)"),
    ("Afterglow", "Van Eerten et al. (2012)"),
    ("metzger_rprocess", "Metzger et al. (2010)"),
    ("korobkin_kilonova", "Wollaeger et al. (2017)"),
    ("Blue", "Metzger (2017)"),
];

/// The reference for a model, e.g. "BNS" is "Dietrich and Ujevic (2017)".
pub fn reference_label(model: &str) -> Option<&'static str> {
    REFERENCES
        .iter()
        .find(|(name, _)| *name == model)
        .map(|(_, reference)| *reference)
}
