pub const BASH_COMPLETION: &str = r#"_snaplink() {
    local cur prev commands
    COMPREPLY=()
    cur="${COMP_WORDS[COMP_CWORD]}"
    prev="${COMP_WORDS[COMP_CWORD-1]}"
    commands="reveal get share shorten completion version help"

    if [[ ${COMP_CWORD} -eq 1 ]]; then
        COMPREPLY=($(compgen -W "${commands}" -- "${cur}"))
        return 0
    fi

    case "${prev}" in
        --file|--password-file)
            COMPREPLY=($(compgen -f -- "${cur}"))
            return 0
            ;;
    esac

    case "${COMP_WORDS[1]}" in
        reveal|get)
            COMPREPLY=($(compgen -W "--copy --password-prompt --password-env --password-file --api-url --json --silent --verbose --help" -- "${cur}"))
            ;;
        share)
            COMPREPLY=($(compgen -W "--text --file --ttl --hit-limit --password-prompt --password-env --password-file --copy --qr --api-url --json --silent --verbose --help" -- "${cur}"))
            ;;
        shorten)
            COMPREPLY=($(compgen -W "--copy --qr --api-url --json --silent --verbose --help" -- "${cur}"))
            ;;
        help)
            COMPREPLY=($(compgen -W "reveal get share shorten" -- "${cur}"))
            ;;
        completion)
            COMPREPLY=($(compgen -W "bash zsh fish" -- "${cur}"))
            ;;
    esac
    return 0
}
complete -F _snaplink snaplink
"#;

pub const ZSH_COMPLETION: &str = r#"#compdef snaplink

_snaplink() {
    local -a commands
    commands=(
        'reveal:Retrieve a secret'
        'get:Retrieve a secret'
        'share:Create a link to a secret'
        'shorten:Create a short link'
        'completion:Output shell completion script'
        'version:Show version'
        'help:Show help'
    )

    _arguments -C \
        '1:command:->command' \
        '*::arg:->args'

    case "$state" in
        command)
            _describe 'command' commands
            ;;
        args)
            case $words[1] in
                reveal|get)
                    _arguments \
                        '1:code or link:' \
                        '--copy[Copy the secret to the clipboard]' \
                        '--password-prompt[Prompt for the password]' \
                        '--password-env[Password env var]:var:' \
                        '--password-file[Password file]:file:_files' \
                        '--api-url[API base URL]:url:' \
                        '--json[Output as JSON]' \
                        '--silent[Suppress status output]' \
                        '--verbose[Debug logging]' \
                        '--help[Show help]'
                    ;;
                share)
                    _arguments \
                        '--text[Secret text]:text:' \
                        '--file[Secret file]:file:_files' \
                        '--ttl[Time to live]:ttl:' \
                        '--hit-limit[Number of retrievals]:n:' \
                        '--password-prompt[Prompt for a password]' \
                        '--password-env[Password env var]:var:' \
                        '--password-file[Password file]:file:_files' \
                        '--copy[Copy the link to the clipboard]' \
                        '--qr[Show the link as a QR code]' \
                        '--api-url[API base URL]:url:' \
                        '--json[Output as JSON]' \
                        '--silent[Suppress status output]' \
                        '--verbose[Debug logging]' \
                        '--help[Show help]'
                    ;;
                shorten)
                    _arguments \
                        '1:url:' \
                        '--copy[Copy the short link to the clipboard]' \
                        '--qr[Show the short link as a QR code]' \
                        '--api-url[API base URL]:url:' \
                        '--json[Output as JSON]' \
                        '--silent[Suppress status output]' \
                        '--verbose[Debug logging]' \
                        '--help[Show help]'
                    ;;
                help)
                    _arguments '1:command:(reveal get share shorten)'
                    ;;
                completion)
                    _arguments '1:shell:(bash zsh fish)'
                    ;;
            esac
            ;;
    esac
}

_snaplink
"#;

pub const FISH_COMPLETION: &str = r#"complete -c snaplink -f
complete -c snaplink -n '__fish_use_subcommand' -a reveal -d 'Retrieve a secret'
complete -c snaplink -n '__fish_use_subcommand' -a get -d 'Retrieve a secret'
complete -c snaplink -n '__fish_use_subcommand' -a share -d 'Create a link to a secret'
complete -c snaplink -n '__fish_use_subcommand' -a shorten -d 'Create a short link'
complete -c snaplink -n '__fish_use_subcommand' -a completion -d 'Output shell completion script'
complete -c snaplink -n '__fish_use_subcommand' -a version -d 'Show version'
complete -c snaplink -n '__fish_use_subcommand' -a help -d 'Show help'

complete -c snaplink -n '__fish_seen_subcommand_from reveal get share shorten' -l api-url -d 'API base URL'
complete -c snaplink -n '__fish_seen_subcommand_from reveal get share shorten' -l json -d 'Output as JSON'
complete -c snaplink -n '__fish_seen_subcommand_from reveal get share shorten' -l silent -d 'Suppress status output'
complete -c snaplink -n '__fish_seen_subcommand_from reveal get share shorten' -l verbose -d 'Debug logging'
complete -c snaplink -n '__fish_seen_subcommand_from reveal get share shorten' -l copy -d 'Copy the result to the clipboard'

complete -c snaplink -n '__fish_seen_subcommand_from reveal get share' -l password-prompt -d 'Prompt for the password'
complete -c snaplink -n '__fish_seen_subcommand_from reveal get share' -l password-env -d 'Password env var'
complete -c snaplink -n '__fish_seen_subcommand_from reveal get share' -l password-file -d 'Password file' -F

complete -c snaplink -n '__fish_seen_subcommand_from share' -l text -d 'Secret text'
complete -c snaplink -n '__fish_seen_subcommand_from share' -l file -d 'Secret file' -F
complete -c snaplink -n '__fish_seen_subcommand_from share' -l ttl -d 'Time to live'
complete -c snaplink -n '__fish_seen_subcommand_from share' -l hit-limit -d 'Number of retrievals'
complete -c snaplink -n '__fish_seen_subcommand_from share shorten' -l qr -d 'Show the link as a QR code'

complete -c snaplink -n '__fish_seen_subcommand_from help' -a 'reveal get share shorten'
complete -c snaplink -n '__fish_seen_subcommand_from completion' -a 'bash zsh fish'
"#;
