/*!

# Quick start

This walk-through goes from a spreadsheet kept by a site office to an organogram image.

**The spreadsheet** Every row places one person, on one day, under a lead who reports to a supervisor. The names of the columns
do not need to be exact: `orgchart` recognizes the usual Portuguese and English variations, ignoring case and accents.

| DT         | Nome | Cargo    | Encarregado | Supervisor | Obs     |
|------------|------|----------|-------------|------------|---------|
| 01/02/2024 | Ana  | Pedreira | Joao        | Marta      |         |
| 01/02/2024 | Bia  | Servente | Joao        | Marta      | turno B |
| 02/02/2024 | Bia  | Servente | Joao        | Marta      |         |
| 02/02/2024 | Caio | Servente | Luis        | Paulo      |         |

The recognized prefixes are:

- date: `data`, `date`, `dt`, `dia`
- name: `nome`, `name`, `funcionario`, `pessoa`
- role: `funcao`, `cargo`, `position`, `role`
- lead: `encarregado`, `responsavel`, `lider`, `leader`, `supervisor_direto`
- supervisor: `supervisor`, `gestor`, `coordenador`, `manager`, `chefe`

Other columns (`Obs` above) are carried along and written back in the exports.

**Checking the import**

```bash
orgchart -i equipes.xlsx import
```

This prints the warnings (blank cells, duplicated rows) and a summary. If there are warnings, the command fails unless
`--force` is passed. An empty spreadsheet always fails.

**Drawing the organogram**

```bash
orgchart -i equipes.xlsx chart --date 02/02/2024 --layout TB
dot -Tsvg organograma_02-02-2024.dot -o organograma.svg
```

Without `--date`, the most recent date is used. `--supervisor` and `--role` can be repeated to keep only some branches,
and `--export equipe.xlsx` writes the filtered rows to a new spreadsheet.

**Comparing two days**

```bash
orgchart -i equipes.xlsx compare --from 01/02/2024 --to 02/02/2024
```

The output lists the people who left and the people who arrived, with the size of each team on both dates.
*/
